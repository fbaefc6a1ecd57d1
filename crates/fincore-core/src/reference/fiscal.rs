//! Fiscal reference tables: corporate tax rates per (country, year) and the
//! single global long-term interest-rate series used as the risk-free proxy.
//!
//! Tax policy differs from penetration on purpose: a missing tax cell
//! defaults to 0 and is never filled from a prior year.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::FincoreError;
use crate::types::{CountryCode, Pct, Year};
use crate::FincoreResult;

/// One loader-supplied corporate tax rate cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRecord {
    pub country_code: CountryCode,
    pub year: Year,
    /// Corporate tax rate (%)
    pub rate: Pct,
}

/// Corporate tax rates indexed by (country, year).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRateTable {
    rates: HashMap<CountryCode, BTreeMap<Year, Pct>>,
}

impl TaxRateTable {
    pub fn from_records(records: Vec<TaxRecord>) -> Self {
        let mut table = TaxRateTable::default();
        for record in records {
            table
                .rates
                .entry(record.country_code)
                .or_default()
                .insert(record.year, record.rate);
        }
        table
    }

    pub fn rate(&self, code: &str, year: Year) -> Option<Pct> {
        self.rates.get(code).and_then(|by_year| by_year.get(&year)).copied()
    }

    /// Missing cells default to 0, never to a prior year's value.
    pub fn rate_or_default(&self, code: &str, year: Year) -> Pct {
        self.rate(code, year).unwrap_or(Pct::ZERO)
    }
}

/// One year of the global long-term interest-rate series (U.S. long-term
/// rate, historical and projected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRateRecord {
    pub year: Year,
    /// Long-term rate (%)
    pub rate: Pct,
}

/// Global risk-free-rate proxy, looked up by year only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterestRateTable {
    rates: BTreeMap<Year, Pct>,
}

impl InterestRateTable {
    pub fn from_records(records: Vec<InterestRateRecord>) -> Self {
        let mut table = InterestRateTable::default();
        for record in records {
            table.rates.insert(record.year, record.rate);
        }
        table
    }

    /// A year absent from the series is a malformed query, not a defaultable
    /// gap.
    pub fn rate(&self, year: Year) -> FincoreResult<Pct> {
        self.rates
            .get(&year)
            .copied()
            .ok_or_else(|| FincoreError::MissingYear {
                series: "InterestRates".into(),
                year,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_tax_defaults_to_zero() {
        let table = TaxRateTable::from_records(vec![TaxRecord {
            country_code: "FRA".into(),
            year: 2022,
            rate: dec!(25.8),
        }]);

        assert_eq!(table.rate("FRA", 2022), Some(dec!(25.8)));
        // No fill from 2022; the 2023 cell simply defaults.
        assert_eq!(table.rate("FRA", 2023), None);
        assert_eq!(table.rate_or_default("FRA", 2023), Pct::ZERO);
        assert_eq!(table.rate_or_default("XXX", 2022), Pct::ZERO);
    }

    #[test]
    fn test_interest_rate_lookup() {
        let table = InterestRateTable::from_records(vec![
            InterestRateRecord { year: 2022, rate: dec!(2.95) },
            InterestRateRecord { year: 2023, rate: dec!(3.96) },
        ]);

        assert_eq!(table.rate(2023).unwrap(), dec!(3.96));
    }

    #[test]
    fn test_missing_interest_rate_year_fails() {
        let table = InterestRateTable::from_records(vec![InterestRateRecord {
            year: 2023,
            rate: dec!(3.96),
        }]);

        assert!(matches!(
            table.rate(2031),
            Err(FincoreError::MissingYear { ref series, year: 2031 }) if series == "InterestRates"
        ));
    }
}
