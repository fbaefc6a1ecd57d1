//! Input resolution: left-joins the per-year series onto the country-risk
//! backbone for batch queries, or onto a single requested country.
//!
//! The two paths deliberately differ in strictness. A batch prefers a partial
//! table: countries with an incomplete risk entry are dropped and missing
//! penetration defaults to zero, each surfaced as a warning. A single-country
//! query is strict: the requested country must resolve, and penetration
//! missing for two consecutive years is an error rather than a deeper fill.

use log::{debug, warn};

use crate::calculator::wacc::{CountryWaccInput, SingleWaccInput};
use crate::error::FincoreError;
use crate::types::{Pct, Technology, Year};
use crate::FincoreResult;

use super::Predictor;

/// Aligned per-country input batch for one (year, technology) query.
#[derive(Debug, Clone)]
pub struct ResolvedYearInputs {
    /// Global risk-free rate (%) for the year
    pub rf_rate: Pct,
    /// Global equity risk premium (%) for the year
    pub erp: Pct,
    /// One row per backbone country with a complete risk entry
    pub rows: Vec<CountryWaccInput>,
    /// Defaults and drops taken while aligning
    pub warnings: Vec<String>,
}

impl Predictor {
    /// Source and align all required series for a batch (year, technology)
    /// query. The country-risk table's country set is the backbone; its
    /// ordering is preserved.
    pub fn resolve_year_inputs(
        &self,
        year: Year,
        technology: &Technology,
    ) -> FincoreResult<ResolvedYearInputs> {
        let data = self.data();

        if !data.country_risk.has_year(year) {
            return Err(FincoreError::MissingYear {
                series: "CountryRisk".into(),
                year,
            });
        }

        let rf_rate = data.interest_rates.rate(year)?;
        let erp = data.country_risk.erp(year)?;
        let variable = technology.generation_variable();

        let mut rows = Vec::with_capacity(data.country_risk.len());
        let mut dropped = 0usize;
        let mut tax_defaulted = 0usize;
        let mut backfilled = 0usize;
        let mut penetration_defaulted = 0usize;

        for entry in data.country_risk.countries() {
            let (crp, cds) = match (entry.crp(year), entry.cds(year)) {
                (Some(crp), Some(cds)) => (crp, cds),
                _ => {
                    dropped += 1;
                    continue;
                }
            };

            let tax_rate = match data.tax_rates.rate(&entry.code, year) {
                Some(rate) => rate,
                None => {
                    tax_defaulted += 1;
                    Pct::ZERO
                }
            };

            let penetration = if technology.forces_zero_penetration() {
                Some(Pct::ZERO)
            } else {
                match data.generation.penetration_backfilled(&entry.code, variable, year) {
                    Some(lookup) => {
                        if lookup.backfilled {
                            backfilled += 1;
                        }
                        Some(lookup.value)
                    }
                    None => {
                        penetration_defaulted += 1;
                        Some(Pct::ZERO)
                    }
                }
            };

            rows.push(CountryWaccInput {
                country_code: entry.code.clone(),
                crp,
                cds,
                tax_rate,
                penetration,
                debt_share: None,
            });
        }

        let mut warnings = Vec::new();
        if dropped > 0 {
            warnings.push(format!(
                "{dropped} countries dropped from {year} batch: incomplete CRP/CDS entry"
            ));
            warn!("{}", warnings.last().unwrap());
        }
        if tax_defaulted > 0 {
            warnings.push(format!(
                "tax rate defaulted to 0 for {tax_defaulted} countries in {year}"
            ));
            debug!("{}", warnings.last().unwrap());
        }
        if backfilled > 0 {
            warnings.push(format!(
                "penetration forward-filled from {} for {backfilled} countries",
                year - 1
            ));
            debug!("{}", warnings.last().unwrap());
        }
        if penetration_defaulted > 0 {
            warnings.push(format!(
                "penetration defaulted to 0 for {penetration_defaulted} countries in {year}"
            ));
            debug!("{}", warnings.last().unwrap());
        }

        Ok(ResolvedYearInputs {
            rf_rate,
            erp,
            rows,
            warnings,
        })
    }

    /// Strictly resolve the inputs for one (country, year, technology) unit.
    pub(crate) fn resolve_country_inputs(
        &self,
        year: Year,
        technology: &Technology,
        country: &str,
        warnings: &mut Vec<String>,
    ) -> FincoreResult<SingleWaccInput> {
        let data = self.data();

        let rf_rate = data.interest_rates.rate(year)?;
        let erp = data.country_risk.erp(year)?;

        let entry = data
            .country_risk
            .entry(country)
            .ok_or_else(|| FincoreError::missing("CountryRisk", country, year))?;
        let crp = entry
            .crp(year)
            .ok_or_else(|| FincoreError::missing("CRP", country, year))?;
        let cds = entry
            .cds(year)
            .ok_or_else(|| FincoreError::missing("CDS", country, year))?;

        let tax_rate = match data.tax_rates.rate(country, year) {
            Some(rate) => rate,
            None => {
                warnings.push(format!("tax rate defaulted to 0 for {country} in {year}"));
                debug!("{}", warnings.last().unwrap());
                Pct::ZERO
            }
        };

        let penetration = self.resolve_penetration_strict(year, technology, country, warnings)?;

        Ok(SingleWaccInput {
            country_code: country.to_string(),
            year,
            rf_rate,
            erp,
            crp,
            cds,
            tax_rate,
            penetration: Some(penetration),
            debt_share: None,
            maturity: None,
        })
    }

    /// Strict penetration resolution: current year, else one year back, else
    /// `MissingReferenceData`.
    pub(crate) fn resolve_penetration_strict(
        &self,
        year: Year,
        technology: &Technology,
        country: &str,
        warnings: &mut Vec<String>,
    ) -> FincoreResult<Pct> {
        if technology.forces_zero_penetration() {
            return Ok(Pct::ZERO);
        }

        let variable = technology.generation_variable();
        let lookup = self
            .data()
            .generation
            .penetration_backfilled(country, variable, year)
            .ok_or_else(|| FincoreError::missing("Generation", country, year))?;

        if lookup.backfilled {
            warnings.push(format!(
                "penetration for {country} forward-filled from {}",
                year - 1
            ));
            debug!("{}", warnings.last().unwrap());
        }

        Ok(lookup.value)
    }
}
