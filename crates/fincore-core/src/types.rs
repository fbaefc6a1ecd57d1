use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rates and shares expressed in percentage points (2.6 = 2.6%).
/// Never as decimal fractions.
pub type Pct = Decimal;

/// Calendar year. All reference tables are keyed by integer year;
/// no stringly-typed year columns anywhere.
pub type Year = i32;

/// ISO3 country code
pub type CountryCode = String;

/// Renewable-energy technology categories priced by the estimator.
///
/// The named variants are the technologies the reference datasets know about;
/// anything else arrives as `Other` and is priced off the generic fallback
/// profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    #[serde(rename = "Solar PV")]
    SolarPv,
    #[serde(rename = "Onshore Wind")]
    OnshoreWind,
    #[serde(rename = "Offshore Wind")]
    OffshoreWind,
    Wave,
    Tidal,
    Geothermal,
    #[serde(rename = "Gas CCUS")]
    GasCcus,
    Other(String),
}

impl Technology {
    /// Variable name under which the yearly generation dataset reports this
    /// technology. Offshore wind reads the combined "Wind" series until a
    /// split offshore series is available; the niche technologies are only
    /// reported in aggregate.
    pub fn generation_variable(&self) -> &str {
        match self {
            Technology::SolarPv => "Solar",
            Technology::OnshoreWind | Technology::OffshoreWind => "Wind",
            Technology::Wave | Technology::Tidal | Technology::Geothermal | Technology::GasCcus => {
                "Other Renewables"
            }
            Technology::Other(name) => name,
        }
    }

    /// Solar and wind are the pricing baseline; every other technology adds
    /// the flat relative premium from its profile on top of the
    /// maturity-derived premium.
    pub fn carries_relative_premium(&self) -> bool {
        !matches!(
            self,
            Technology::SolarPv | Technology::OnshoreWind | Technology::OffshoreWind
        )
    }

    /// Gas CCUS has no deployed generation to classify against; its
    /// penetration is forced to zero regardless of the aggregate series.
    pub fn forces_zero_penetration(&self) -> bool {
        matches!(self, Technology::GasCcus)
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technology::SolarPv => write!(f, "Solar PV"),
            Technology::OnshoreWind => write!(f, "Onshore Wind"),
            Technology::OffshoreWind => write!(f, "Offshore Wind"),
            Technology::Wave => write!(f, "Wave"),
            Technology::Tidal => write!(f, "Tidal"),
            Technology::Geothermal => write!(f, "Geothermal"),
            Technology::GasCcus => write!(f, "Gas CCUS"),
            Technology::Other(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for Technology {
    type Err = std::convert::Infallible;

    /// Accepts both the display names and the raw dataset spellings
    /// ("Solar", "Wind", "Wind Offshore").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Solar PV" | "Solar" => Technology::SolarPv,
            "Onshore Wind" | "Wind" => Technology::OnshoreWind,
            "Offshore Wind" | "Wind Offshore" => Technology::OffshoreWind,
            "Wave" => Technology::Wave,
            "Tidal" => Technology::Tidal,
            "Geothermal" => Technology::Geothermal,
            "Gas CCUS" => Technology::GasCcus,
            other => Technology::Other(other.to_string()),
        })
    }
}

/// Market maturity tier of a technology in a given country and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityTier {
    Immature,
    Intermediate,
    Mature,
}

impl fmt::Display for MaturityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaturityTier::Immature => write!(f, "Immature"),
            MaturityTier::Intermediate => write!(f, "Intermediate"),
            MaturityTier::Mature => write!(f, "Mature"),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
