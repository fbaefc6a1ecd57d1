//! Per-technology pricing constants: maturity thresholds, maturity-tier
//! premiums, and the flat relative premium vs. the solar baseline.

use serde::{Deserialize, Serialize};

use crate::error::FincoreError;
use crate::types::{Pct, Technology};
use crate::FincoreResult;

/// Pricing constants for one technology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyProfile {
    /// Penetration (%) above which a market is at least Intermediate
    pub intermediate_threshold: Pct,
    /// Penetration (%) above which a market is Mature
    pub mature_threshold: Pct,
    /// Premium (%) applied in Immature markets
    pub immature_premium: Pct,
    /// Premium (%) carried from the source data; superseded by linear
    /// interpolation between the immature and mature premiums
    pub intermediate_premium: Pct,
    /// Premium (%) applied in Mature markets
    pub mature_premium: Pct,
    /// Flat premium (%) vs. the solar baseline, applied to technologies
    /// outside the solar/wind set
    pub relative_premium: Pct,
}

/// Technology profile table with a mandatory generic fallback.
///
/// Unknown technologies resolve to the fallback profile; insertion order of
/// the named profiles is preserved for presentation-layer selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyProfiles {
    profiles: Vec<(Technology, TechnologyProfile)>,
    fallback: TechnologyProfile,
}

impl TechnologyProfiles {
    pub fn new(
        entries: Vec<(Technology, TechnologyProfile)>,
        fallback: TechnologyProfile,
    ) -> FincoreResult<Self> {
        for (tech, profile) in &entries {
            validate_thresholds(&tech.to_string(), profile)?;
        }
        validate_thresholds("fallback", &fallback)?;

        Ok(TechnologyProfiles {
            profiles: entries,
            fallback,
        })
    }

    /// Profile for a technology, falling back to the generic profile when the
    /// technology has no entry of its own.
    pub fn get(&self, technology: &Technology) -> &TechnologyProfile {
        self.find(technology).unwrap_or(&self.fallback)
    }

    /// Strict lookup: unknown technologies are an error instead of a
    /// fallback.
    pub fn get_strict(&self, technology: &Technology) -> FincoreResult<&TechnologyProfile> {
        self.find(technology)
            .ok_or_else(|| FincoreError::UnknownTechnology(technology.to_string()))
    }

    pub fn contains(&self, technology: &Technology) -> bool {
        self.find(technology).is_some()
    }

    /// Known technologies in insertion order.
    pub fn technologies(&self) -> impl Iterator<Item = &Technology> {
        self.profiles.iter().map(|(tech, _)| tech)
    }

    fn find(&self, technology: &Technology) -> Option<&TechnologyProfile> {
        self.profiles
            .iter()
            .find(|(tech, _)| tech == technology)
            .map(|(_, profile)| profile)
    }
}

fn validate_thresholds(name: &str, profile: &TechnologyProfile) -> FincoreResult<()> {
    if profile.mature_threshold <= profile.intermediate_threshold {
        return Err(FincoreError::InvalidInput {
            field: "mature_threshold".into(),
            reason: format!(
                "{name}: mature threshold ({}) must exceed intermediate threshold ({})",
                profile.mature_threshold, profile.intermediate_threshold
            ),
        });
    }
    Ok(())
}
