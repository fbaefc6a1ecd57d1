//! Country risk reference table: per-country, per-year country risk premiums
//! and ratings-based default spreads, plus the global equity risk premium.
//!
//! The source dataset stores the global ERP as a pseudo-country row with code
//! "ERP". That row is split out at construction time so country-indexed
//! operations can never observe it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::FincoreError;
use crate::types::{CountryCode, Pct, Year};
use crate::FincoreResult;

/// Country code of the sentinel row carrying the global equity risk premium.
pub const ERP_SENTINEL: &str = "ERP";

/// One loader-supplied cell of the country risk dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRiskRecord {
    /// ISO3 country code (or "ERP" for the global equity-risk-premium row)
    pub country_code: CountryCode,
    /// Country name
    pub country: String,
    /// Year the values apply to
    pub year: Year,
    /// Country risk premium (%), if published for this year
    pub crp: Option<Pct>,
    /// Ratings-based default spread (%), if published for this year
    pub cds: Option<Pct>,
}

/// Per-country risk series across years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryEntry {
    pub code: CountryCode,
    pub name: String,
    crp: BTreeMap<Year, Pct>,
    cds: BTreeMap<Year, Pct>,
}

impl CountryEntry {
    pub fn crp(&self, year: Year) -> Option<Pct> {
        self.crp.get(&year).copied()
    }

    pub fn cds(&self, year: Year) -> Option<Pct> {
        self.cds.get(&year).copied()
    }
}

/// Country risk premiums and default spreads, indexed by country and year.
///
/// Country iteration order is first-seen order from the input records; it is
/// the backbone ordering for every batch query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRiskTable {
    countries: Vec<CountryEntry>,
    index: HashMap<CountryCode, usize>,
    erp: BTreeMap<Year, Pct>,
}

impl CountryRiskTable {
    pub fn from_records(records: Vec<CountryRiskRecord>) -> FincoreResult<Self> {
        let mut table = CountryRiskTable {
            countries: Vec::new(),
            index: HashMap::new(),
            erp: BTreeMap::new(),
        };

        for record in records {
            if record.country_code == ERP_SENTINEL {
                let value = record.crp.ok_or_else(|| FincoreError::InvalidInput {
                    field: "crp".into(),
                    reason: format!("ERP sentinel row for {} carries no value", record.year),
                })?;
                table.erp.insert(record.year, value);
                continue;
            }

            let idx = match table.index.get(&record.country_code) {
                Some(&idx) => idx,
                None => {
                    table.countries.push(CountryEntry {
                        code: record.country_code.clone(),
                        name: record.country.clone(),
                        crp: BTreeMap::new(),
                        cds: BTreeMap::new(),
                    });
                    let idx = table.countries.len() - 1;
                    table.index.insert(record.country_code.clone(), idx);
                    idx
                }
            };

            let entry = &mut table.countries[idx];
            if let Some(crp) = record.crp {
                entry.crp.insert(record.year, crp);
            }
            if let Some(cds) = record.cds {
                entry.cds.insert(record.year, cds);
            }
        }

        Ok(table)
    }

    /// Global equity risk premium for a year. The sentinel is a required
    /// series: a missing year fails the query.
    pub fn erp(&self, year: Year) -> FincoreResult<Pct> {
        self.erp
            .get(&year)
            .copied()
            .ok_or_else(|| FincoreError::missing("ERP", ERP_SENTINEL, year))
    }

    /// Backbone iteration for batch queries, in first-seen order.
    pub fn countries(&self) -> impl Iterator<Item = &CountryEntry> {
        self.countries.iter()
    }

    pub fn entry(&self, code: &str) -> Option<&CountryEntry> {
        self.index.get(code).map(|&idx| &self.countries[idx])
    }

    pub fn crp(&self, code: &str, year: Year) -> Option<Pct> {
        self.entry(code).and_then(|e| e.crp(year))
    }

    pub fn cds(&self, code: &str, year: Year) -> Option<Pct> {
        self.entry(code).and_then(|e| e.cds(year))
    }

    /// Whether any country carries a CRP value for the year. Requesting a
    /// year entirely absent from the dataset is a malformed query.
    pub fn has_year(&self, year: Year) -> bool {
        self.countries.iter().any(|e| e.crp.contains_key(&year))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
