//! Historical queries: batch per-country tables, single-country year ranges,
//! and per-technology comparisons.

use std::time::Instant;

use serde_json::json;

use crate::calculator::wacc::WaccResult;
use crate::error::FincoreError;
use crate::types::{with_metadata, ComputationOutput, Technology, Year};
use crate::FincoreResult;

use super::Predictor;

impl Predictor {
    /// WACC for every backbone country in one (year, technology), one row per
    /// country in backbone order. Rows are presentation-rounded.
    pub fn calculate_historical_waccs(
        &self,
        year: Year,
        technology: &Technology,
    ) -> FincoreResult<ComputationOutput<Vec<WaccResult>>> {
        let start = Instant::now();

        let resolved = self.resolve_year_inputs(year, technology)?;
        let results = self.calculator().compute_country_waccs(
            year,
            technology,
            resolved.rf_rate,
            resolved.erp,
            &resolved.rows,
        )?;
        let rows: Vec<WaccResult> = results.iter().map(WaccResult::rounded).collect();

        Ok(with_metadata(
            "Historical WACC decomposition, batch over country-risk backbone",
            &json!({
                "year": year,
                "technology": technology.to_string(),
                "risk_free_rate": resolved.rf_rate,
                "equity_risk_premium": resolved.erp,
                "lenders_margin": self.calculator().lenders_margin(),
            }),
            resolved.warnings,
            start.elapsed().as_micros() as u64,
            rows,
        ))
    }

    /// Single-country WACC for each year in `[start_year, end_year]`, in
    /// ascending year order.
    pub fn year_range_wacc(
        &self,
        start_year: Year,
        end_year: Year,
        technology: &Technology,
        country: &str,
    ) -> FincoreResult<ComputationOutput<Vec<WaccResult>>> {
        let start = Instant::now();

        if end_year < start_year {
            return Err(FincoreError::InvalidInput {
                field: "end_year".into(),
                reason: format!("year range {start_year}..{end_year} is empty"),
            });
        }

        let mut warnings = Vec::new();
        let mut rows = Vec::with_capacity((end_year - start_year + 1) as usize);
        for year in start_year..=end_year {
            let result = self.calculate_yearly_wacc(year, technology, country, &mut warnings)?;
            rows.push(result.rounded());
        }

        Ok(with_metadata(
            "Single-country WACC by year",
            &json!({
                "start_year": start_year,
                "end_year": end_year,
                "technology": technology.to_string(),
                "country": country,
            }),
            warnings,
            start.elapsed().as_micros() as u64,
            rows,
        ))
    }

    /// WACC for a fixed (year, country) across a list of technologies, one
    /// row per technology in input order.
    pub fn calculate_technology_wacc(
        &self,
        year: Year,
        country: &str,
        technologies: &[Technology],
    ) -> FincoreResult<ComputationOutput<Vec<WaccResult>>> {
        let start = Instant::now();

        let mut warnings = Vec::new();
        let mut rows = Vec::with_capacity(technologies.len());
        for technology in technologies {
            let result = self.calculate_yearly_wacc(year, technology, country, &mut warnings)?;
            rows.push(result.rounded());
        }

        Ok(with_metadata(
            "Single-country WACC by technology",
            &json!({
                "year": year,
                "country": country,
                "technologies": technologies.iter().map(Technology::to_string).collect::<Vec<_>>(),
            }),
            warnings,
            start.elapsed().as_micros() as u64,
            rows,
        ))
    }

    /// Single-country yearly calculation shared by the range, technology, and
    /// projection queries.
    pub(crate) fn calculate_yearly_wacc(
        &self,
        year: Year,
        technology: &Technology,
        country: &str,
        warnings: &mut Vec<String>,
    ) -> FincoreResult<WaccResult> {
        let input = self.resolve_country_inputs(year, technology, country, warnings)?;
        self.calculator().compute_single_wacc(technology, &input)
    }
}
