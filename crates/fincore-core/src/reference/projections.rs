//! Forward-looking reference tables: national renewable-adoption targets and
//! GDP-per-capita projections.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::types::{CountryCode, Pct, Technology, Year};

/// One loader-supplied renewable generation target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewableTargetRecord {
    pub country_code: CountryCode,
    pub technology: Technology,
    /// Targeted share of generation (%)
    pub target_share: Pct,
    /// Year the target is set for
    pub target_year: Year,
}

/// A (share, year) target pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewableTarget {
    pub share: Pct,
    pub year: Year,
}

/// Renewable-adoption targets indexed by (country, technology).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenewableTargetTable {
    targets: HashMap<(CountryCode, Technology), RenewableTarget>,
}

impl RenewableTargetTable {
    pub fn from_records(records: Vec<RenewableTargetRecord>) -> Self {
        let mut table = RenewableTargetTable::default();
        for record in records {
            table.targets.insert(
                (record.country_code, record.technology),
                RenewableTarget {
                    share: record.target_share,
                    year: record.target_year,
                },
            );
        }
        table
    }

    pub fn target(&self, code: &str, technology: &Technology) -> Option<RenewableTarget> {
        self.targets
            .get(&(code.to_string(), technology.clone()))
            .copied()
    }
}

/// One loader-supplied GDP-per-capita projection cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdpProjectionRecord {
    pub country_code: CountryCode,
    pub year: Year,
    pub gdp_per_capita: Decimal,
}

/// A GDP growth ratio between two years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GdpRatio {
    pub value: Decimal,
    /// True when either cell was missing and the neutral ratio was applied
    pub fallback: bool,
}

/// GDP-per-capita projections indexed by (country, year).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdpProjectionTable {
    gdp: HashMap<CountryCode, BTreeMap<Year, Decimal>>,
}

impl GdpProjectionTable {
    pub fn from_records(records: Vec<GdpProjectionRecord>) -> Self {
        let mut table = GdpProjectionTable::default();
        for record in records {
            table
                .gdp
                .entry(record.country_code)
                .or_default()
                .insert(record.year, record.gdp_per_capita);
        }
        table
    }

    pub fn gdp(&self, code: &str, year: Year) -> Option<Decimal> {
        self.gdp.get(code).and_then(|by_year| by_year.get(&year)).copied()
    }

    /// Growth ratio `gdp(year) / gdp(base_year)`. Any lookup failure, and any
    /// non-positive cell, takes the explicit neutral-ratio path so one thin
    /// projection row cannot fail a whole query. Callers must surface the
    /// fallback.
    pub fn ratio(&self, code: &str, year: Year, base_year: Year) -> GdpRatio {
        match (self.gdp(code, year), self.gdp(code, base_year)) {
            (Some(new), Some(old)) if new > Decimal::ZERO && old > Decimal::ZERO => GdpRatio {
                value: new / old,
                fallback: false,
            },
            _ => GdpRatio {
                value: Decimal::ONE,
                fallback: true,
            },
        }
    }
}
