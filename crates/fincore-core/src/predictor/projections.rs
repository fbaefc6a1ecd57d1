//! Forward projections: extrapolate the resolved inputs past the last
//! historical year under explicit, caller-selected assumptions.

use std::time::Instant;

use log::{debug, warn};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::calculator::wacc::{SingleWaccInput, WaccResult};
use crate::error::FincoreError;
use crate::types::{with_metadata, ComputationOutput, Pct, Technology, Year};
use crate::FincoreResult;

use super::{Predictor, FIRST_PROJECTION_YEAR, PROJECTION_BASE_YEAR};

/// GDP-per-capita elasticity of sovereign risk: richer countries carry lower
/// premiums.
pub const GDP_RISK_ELASTICITY: Decimal = dec!(-0.15);

/// Which inputs a projection is allowed to move; everything disabled holds
/// the corresponding series flat at the base year. Passed explicitly through
/// the call chain.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Use projected interest rates instead of freezing the base-year rate
    pub interest_rates: bool,
    /// Scale CRP/CDS by projected GDP-per-capita growth
    pub gdp_change: bool,
    /// Move penetration toward national renewable targets
    pub renewable_targets: bool,
}

impl Predictor {
    /// Projected single-country WACC for each year from 2025 through
    /// `end_year`, in ascending year order. Tax rate and ERP are always held
    /// at the base year; the remaining inputs move only under the
    /// corresponding assumption flag.
    pub fn projections_wacc(
        &self,
        end_year: Year,
        technology: &Technology,
        country: &str,
        assumptions: ProjectionAssumptions,
    ) -> FincoreResult<ComputationOutput<Vec<WaccResult>>> {
        let start = Instant::now();

        if end_year < FIRST_PROJECTION_YEAR {
            return Err(FincoreError::InvalidInput {
                field: "end_year".into(),
                reason: format!(
                    "projections start in {FIRST_PROJECTION_YEAR}; got end year {end_year}"
                ),
            });
        }

        let mut warnings = Vec::new();
        let mut rows = Vec::with_capacity((end_year - FIRST_PROJECTION_YEAR + 1) as usize);
        for year in FIRST_PROJECTION_YEAR..=end_year {
            let result =
                self.calculate_future_wacc(year, technology, country, assumptions, &mut warnings)?;
            rows.push(result.rounded());
        }

        Ok(with_metadata(
            "Projected single-country WACC under explicit assumptions",
            &json!({
                "end_year": end_year,
                "technology": technology.to_string(),
                "country": country,
                "base_year": PROJECTION_BASE_YEAR,
                "assumptions": assumptions,
            }),
            warnings,
            start.elapsed().as_micros() as u64,
            rows,
        ))
    }

    fn calculate_future_wacc(
        &self,
        year: Year,
        technology: &Technology,
        country: &str,
        assumptions: ProjectionAssumptions,
        warnings: &mut Vec<String>,
    ) -> FincoreResult<WaccResult> {
        let data = self.data();
        let base = PROJECTION_BASE_YEAR;

        let rf_rate = if assumptions.interest_rates {
            data.interest_rates.rate(year)?
        } else {
            data.interest_rates.rate(base)?
        };

        let entry = data
            .country_risk
            .entry(country)
            .ok_or_else(|| FincoreError::missing("CountryRisk", country, base))?;
        let base_crp = entry
            .crp(base)
            .ok_or_else(|| FincoreError::missing("CRP", country, base))?;
        let base_cds = entry
            .cds(base)
            .ok_or_else(|| FincoreError::missing("CDS", country, base))?;

        let (crp, cds) = if assumptions.gdp_change {
            let ratio = data.gdp_projections.ratio(country, year, base);
            if ratio.fallback {
                warnings.push(format!(
                    "GDP projection unavailable for {country} in {year}; sovereign risk held flat"
                ));
                warn!("{}", warnings.last().unwrap());
            }
            let factor = ratio.value.powd(GDP_RISK_ELASTICITY);
            (base_crp * factor, base_cds * factor)
        } else {
            (base_crp, base_cds)
        };

        let erp = data.country_risk.erp(base)?;

        let base_penetration =
            self.resolve_penetration_strict(base, technology, country, warnings)?;
        let penetration = if assumptions.renewable_targets {
            self.projected_penetration(base_penetration, technology, country, year, warnings)
        } else {
            base_penetration
        };

        let tax_rate = data.tax_rates.rate_or_default(country, base);
        if data.tax_rates.rate(country, base).is_none() {
            warnings.push(format!("tax rate defaulted to 0 for {country} in {base}"));
            debug!("{}", warnings.last().unwrap());
        }

        self.calculator().compute_single_wacc(
            technology,
            &SingleWaccInput {
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
            },
        )
    }

    /// Linear interpolation from the base-year penetration toward the
    /// national target; flat when no target exists for this (country,
    /// technology) pair.
    fn projected_penetration(
        &self,
        base_penetration: Pct,
        technology: &Technology,
        country: &str,
        year: Year,
        warnings: &mut Vec<String>,
    ) -> Pct {
        let Some(target) = self.data().renewable_targets.target(country, technology) else {
            return base_penetration;
        };

        if target.year <= PROJECTION_BASE_YEAR {
            warnings.push(format!(
                "renewable target for {country}/{technology} expired in {}; penetration held flat",
                target.year
            ));
            debug!("{}", warnings.last().unwrap());
            return base_penetration;
        }

        let elapsed = Pct::from(year - PROJECTION_BASE_YEAR);
        let horizon = Pct::from(target.year - PROJECTION_BASE_YEAR);
        base_penetration + elapsed * (target.share - base_penetration) / horizon
    }
}
