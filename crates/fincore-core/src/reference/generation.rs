//! Generation reference table: share of electricity generation and installed
//! capacity per (country, generation variable, year).
//!
//! The yearly generation dataset reports many variables; the loader filters it
//! down to percentage generation shares before handing records over. Stale
//! cells are forward-filled from the immediately preceding year only; a gap of
//! two or more years is a missing value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::types::{CountryCode, Pct, Year};

/// One loader-supplied row of the generation dataset, already filtered to
/// (Category = "Electricity generation", Unit = "%") for the share values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub country_code: CountryCode,
    pub year: Year,
    /// Generation variable name, e.g. "Solar", "Wind", "Other Renewables"
    pub variable: String,
    /// Share of electricity generation (%)
    pub share_of_generation: Pct,
    /// Installed capacity (GW), where reported
    pub capacity_gw: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GenerationPoint {
    share: Pct,
    capacity_gw: Option<Decimal>,
}

/// A resolved penetration value, with provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenetrationLookup {
    /// Share of generation (%)
    pub value: Pct,
    /// True when the value was forward-filled from the previous year
    pub backfilled: bool,
}

/// Generation shares and capacity, indexed by (country, variable, year).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationTable {
    series: HashMap<(CountryCode, String), BTreeMap<Year, GenerationPoint>>,
}

impl GenerationTable {
    pub fn from_records(records: Vec<GenerationRecord>) -> Self {
        let mut table = GenerationTable::default();
        for record in records {
            table
                .series
                .entry((record.country_code, record.variable))
                .or_default()
                .insert(
                    record.year,
                    GenerationPoint {
                        share: record.share_of_generation,
                        capacity_gw: record.capacity_gw,
                    },
                );
        }
        table
    }

    pub fn penetration(&self, code: &str, variable: &str, year: Year) -> Option<Pct> {
        self.point(code, variable, year).map(|p| p.share)
    }

    /// Penetration for `year`, forward-filled from `year - 1` when the cell
    /// is stale. Returns `None` when both years are missing; filling further
    /// back is never attempted.
    pub fn penetration_backfilled(
        &self,
        code: &str,
        variable: &str,
        year: Year,
    ) -> Option<PenetrationLookup> {
        if let Some(point) = self.point(code, variable, year) {
            return Some(PenetrationLookup {
                value: point.share,
                backfilled: false,
            });
        }
        self.point(code, variable, year - 1).map(|point| PenetrationLookup {
            value: point.share,
            backfilled: true,
        })
    }

    pub fn capacity_gw(&self, code: &str, variable: &str, year: Year) -> Option<Decimal> {
        self.point(code, variable, year).and_then(|p| p.capacity_gw)
    }

    fn point(&self, code: &str, variable: &str, year: Year) -> Option<GenerationPoint> {
        self.series
            .get(&(code.to_string(), variable.to_string()))
            .and_then(|by_year| by_year.get(&year))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(code: &str, year: Year, variable: &str, share: Pct) -> GenerationRecord {
        GenerationRecord {
            country_code: code.to_string(),
            year,
            variable: variable.to_string(),
            share_of_generation: share,
            capacity_gw: None,
        }
    }

    #[test]
    fn test_present_year_is_not_backfilled() {
        let table = GenerationTable::from_records(vec![
            record("DEU", 2022, "Solar", dec!(10.0)),
            record("DEU", 2023, "Solar", dec!(12.0)),
        ]);

        let lookup = table.penetration_backfilled("DEU", "Solar", 2023).unwrap();
        assert_eq!(lookup.value, dec!(12.0));
        assert!(!lookup.backfilled);
    }

    #[test]
    fn test_missing_year_fills_from_previous() {
        let table = GenerationTable::from_records(vec![record("DEU", 2022, "Solar", dec!(10.0))]);

        let lookup = table.penetration_backfilled("DEU", "Solar", 2023).unwrap();
        assert_eq!(lookup.value, dec!(10.0));
        assert!(lookup.backfilled);
    }

    #[test]
    fn test_two_missing_years_resolve_to_none() {
        let table = GenerationTable::from_records(vec![record("DEU", 2021, "Solar", dec!(9.0))]);

        assert_eq!(table.penetration_backfilled("DEU", "Solar", 2023), None);
    }

    #[test]
    fn test_variables_are_independent() {
        let table = GenerationTable::from_records(vec![
            record("DEU", 2023, "Solar", dec!(12.0)),
            record("DEU", 2023, "Wind", dec!(25.0)),
        ]);

        assert_eq!(table.penetration("DEU", "Solar", 2023), Some(dec!(12.0)));
        assert_eq!(table.penetration("DEU", "Wind", 2023), Some(dec!(25.0)));
        assert_eq!(table.penetration("DEU", "Other Renewables", 2023), None);
    }

    #[test]
    fn test_capacity_lookup() {
        let table = GenerationTable::from_records(vec![GenerationRecord {
            country_code: "DEU".into(),
            year: 2023,
            variable: "Solar".into(),
            share_of_generation: dec!(12.0),
            capacity_gw: Some(dec!(81.7)),
        }]);

        assert_eq!(table.capacity_gw("DEU", "Solar", 2023), Some(dec!(81.7)));
        assert_eq!(table.capacity_gw("DEU", "Wind", 2023), None);
    }
}
