//! Weighted average cost of capital: per-country computation and the
//! additive decomposition into named contribution factors.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FincoreError;
use crate::types::{CountryCode, MaturityTier, Pct, Technology, Year};
use crate::FincoreResult;

use super::debt_share::{debt_share_batch, debt_share_individual};
use super::Calculator;

/// Flat add-on (% points) applied to Offshore Wind in the batch path.
pub const OFFSHORE_WIND_ADJUSTMENT: Pct = dec!(1);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fully-resolved scalar inputs for one (country, year) computation unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccComponents {
    /// Risk-free rate (%)
    pub risk_free_rate: Pct,
    /// Country risk premium (%), priced on the equity leg
    pub country_risk_premium: Pct,
    /// Credit default spread (%), priced on the debt leg
    pub default_spread: Pct,
    /// Global equity risk premium (%)
    pub equity_risk_premium: Pct,
    /// Lenders' margin (%)
    pub lenders_margin: Pct,
    /// Corporate tax rate (%)
    pub tax_rate: Pct,
    /// Debt share of project financing (%)
    pub debt_share: Pct,
    /// Technology risk premium (%)
    pub technology_premium: Pct,
}

/// One decomposed cost-of-capital estimate.
///
/// The five contribution fields sum to `wacc`, with one deliberate
/// exception: the Offshore Wind batch adjustment raises `wacc` without
/// touching the contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaccResult {
    pub country_code: CountryCode,
    pub year: Year,
    pub technology: Technology,
    /// Risk-free contribution (%)
    pub risk_free: Pct,
    /// Country risk contribution (%): CDS on the debt leg, CRP on the equity leg
    pub country_risk: Pct,
    /// Equity risk premium contribution (%)
    pub equity_risk: Pct,
    /// Lenders' margin contribution (%)
    pub lenders_margin: Pct,
    /// Technology risk contribution (%)
    pub technology_risk: Pct,
    /// Cost of equity (%)
    pub cost_of_equity: Pct,
    /// Cost of debt (%)
    pub cost_of_debt: Pct,
    /// Weighted average cost of capital (%)
    pub wacc: Pct,
    /// Debt share of financing (%)
    pub debt_share: Pct,
    /// Corporate tax rate (%)
    pub tax_rate: Pct,
}

impl WaccResult {
    /// Sum of the five contribution factors.
    pub fn contribution_sum(&self) -> Pct {
        self.risk_free + self.country_risk + self.equity_risk + self.lenders_margin
            + self.technology_risk
    }

    /// Presentation form: every percentage field rounded to 2 decimal places.
    pub fn rounded(&self) -> WaccResult {
        WaccResult {
            country_code: self.country_code.clone(),
            year: self.year,
            technology: self.technology.clone(),
            risk_free: self.risk_free.round_dp(2),
            country_risk: self.country_risk.round_dp(2),
            equity_risk: self.equity_risk.round_dp(2),
            lenders_margin: self.lenders_margin.round_dp(2),
            technology_risk: self.technology_risk.round_dp(2),
            cost_of_equity: self.cost_of_equity.round_dp(2),
            cost_of_debt: self.cost_of_debt.round_dp(2),
            wacc: self.wacc.round_dp(2),
            debt_share: self.debt_share.round_dp(2),
            tax_rate: self.tax_rate.round_dp(2),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute one decomposed WACC estimate from fully-resolved components.
///
/// Cost of debt: rf + CDS + lenders' margin + technology premium.
/// Cost of equity: rf + CRP + ERP + technology premium.
/// WACC: debt cost weighted by the after-tax debt share plus equity cost
/// weighted by the equity share.
pub fn compute_wacc(
    country_code: &str,
    year: Year,
    technology: &Technology,
    c: &WaccComponents,
) -> FincoreResult<WaccResult> {
    validate_components(c)?;

    let cost_of_debt =
        c.risk_free_rate + c.default_spread + c.lenders_margin + c.technology_premium;
    let cost_of_equity =
        c.risk_free_rate + c.country_risk_premium + c.equity_risk_premium + c.technology_premium;

    let debt_weight = c.debt_share / dec!(100);
    let equity_weight = Pct::ONE - debt_weight;
    let after_tax = Pct::ONE - c.tax_rate / dec!(100);

    let wacc = cost_of_debt * debt_weight * after_tax + cost_of_equity * equity_weight;

    // Both legs carry the risk-free rate and the technology premium; sovereign
    // risk splits across them: lenders price it as the default spread, equity
    // investors as the country risk premium.
    let blended_weight = debt_weight * after_tax + equity_weight;
    let risk_free = c.risk_free_rate * blended_weight;
    let country_risk =
        c.default_spread * debt_weight * after_tax + c.country_risk_premium * equity_weight;
    let equity_risk = c.equity_risk_premium * equity_weight;
    let lenders_margin = c.lenders_margin * debt_weight * after_tax;
    let technology_risk = c.technology_premium * blended_weight;

    Ok(WaccResult {
        country_code: country_code.to_string(),
        year,
        technology: technology.clone(),
        risk_free,
        country_risk,
        equity_risk,
        lenders_margin,
        technology_risk,
        cost_of_equity,
        cost_of_debt,
        wacc,
        debt_share: c.debt_share,
        tax_rate: c.tax_rate,
    })
}

/// One backbone row of a batch request, as resolved by the predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryWaccInput {
    pub country_code: CountryCode,
    /// Country risk premium (%)
    pub crp: Pct,
    /// Credit default spread (%)
    pub cds: Pct,
    /// Corporate tax rate (%)
    pub tax_rate: Pct,
    /// Technology penetration (% of generation); `None` counts as zero
    pub penetration: Option<Pct>,
    /// Explicit debt share override; the batch rule applies otherwise
    pub debt_share: Option<Pct>,
}

/// Single-country computation inputs, as resolved by the predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleWaccInput {
    pub country_code: CountryCode,
    pub year: Year,
    /// Risk-free rate (%)
    pub rf_rate: Pct,
    /// Global equity risk premium (%)
    pub erp: Pct,
    /// Country risk premium (%)
    pub crp: Pct,
    /// Credit default spread (%)
    pub cds: Pct,
    /// Corporate tax rate (%)
    pub tax_rate: Pct,
    /// Technology penetration (% of generation); `None` counts as zero
    pub penetration: Option<Pct>,
    /// Explicit debt share override; the fixed-divisor rule applies otherwise
    pub debt_share: Option<Pct>,
    /// Explicit maturity override
    pub maturity: Option<MaturityTier>,
}

impl Calculator {
    /// Batch WACC: one row per country, in input order. Debt shares are
    /// normalized against the maximum CRP of this request's country set
    /// unless a row carries an explicit override.
    pub fn compute_country_waccs(
        &self,
        year: Year,
        technology: &Technology,
        rf_rate: Pct,
        erp: Pct,
        rows: &[CountryWaccInput],
    ) -> FincoreResult<Vec<WaccResult>> {
        let max_crp = rows.iter().map(|row| row.crp).max().unwrap_or(Pct::ZERO);

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let (_, technology_premium) =
                self.maturity_and_premium(technology, row.penetration, None)?;
            let debt_share = match row.debt_share {
                Some(share) => share,
                None => debt_share_batch(row.crp, max_crp)?,
            };

            let mut result = compute_wacc(
                &row.country_code,
                year,
                technology,
                &WaccComponents {
                    risk_free_rate: rf_rate,
                    country_risk_premium: row.crp,
                    default_spread: row.cds,
                    equity_risk_premium: erp,
                    lenders_margin: self.lenders_margin(),
                    tax_rate: row.tax_rate,
                    debt_share,
                    technology_premium,
                },
            )?;

            // Known discrepancy, kept on purpose: the offshore add-on lands on
            // the headline WACC only, so batch offshore rows exceed their
            // contribution sum by exactly this constant.
            if *technology == Technology::OffshoreWind {
                result.wacc += OFFSHORE_WIND_ADJUSTMENT;
            }

            results.push(result);
        }

        Ok(results)
    }

    /// Single-country WACC, using the fixed-divisor debt-share rule. No
    /// offshore adjustment on this path.
    pub fn compute_single_wacc(
        &self,
        technology: &Technology,
        input: &SingleWaccInput,
    ) -> FincoreResult<WaccResult> {
        let (_, technology_premium) =
            self.maturity_and_premium(technology, input.penetration, input.maturity)?;
        let debt_share = input
            .debt_share
            .unwrap_or_else(|| debt_share_individual(input.crp));

        compute_wacc(
            &input.country_code,
            input.year,
            technology,
            &WaccComponents {
                risk_free_rate: input.rf_rate,
                country_risk_premium: input.crp,
                default_spread: input.cds,
                equity_risk_premium: input.erp,
                lenders_margin: self.lenders_margin(),
                tax_rate: input.tax_rate,
                debt_share,
                technology_premium,
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_components(c: &WaccComponents) -> FincoreResult<()> {
    if c.tax_rate < Pct::ZERO || c.tax_rate > dec!(100) {
        return Err(FincoreError::InvalidInput {
            field: "tax_rate".into(),
            reason: format!("tax rate must be between 0 and 100, got {}", c.tax_rate),
        });
    }
    if c.debt_share < Pct::ZERO || c.debt_share > dec!(100) {
        return Err(FincoreError::InvalidInput {
            field: "debt_share".into(),
            reason: format!("debt share must be between 0 and 100, got {}", c.debt_share),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mature_solar_components() -> WaccComponents {
        WaccComponents {
            risk_free_rate: dec!(2.6),
            country_risk_premium: dec!(5.0),
            default_spread: dec!(3.0),
            equity_risk_premium: dec!(5.0),
            lenders_margin: dec!(2.0),
            tax_rate: dec!(25),
            debt_share: dec!(80),
            technology_premium: dec!(1.5),
        }
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute_wacc("USA", 2023, &Technology::SolarPv, &mature_solar_components())
            .unwrap();

        // Debt: 2.6 + 3.0 + 2.0 + 1.5 = 9.1; equity: 2.6 + 5.0 + 5.0 + 1.5 = 14.1
        assert_eq!(result.cost_of_debt, dec!(9.1));
        assert_eq!(result.cost_of_equity, dec!(14.1));

        // 9.1 * 0.8 * 0.75 + 14.1 * 0.2 = 5.46 + 2.82 = 8.28
        assert_eq!(result.wacc, dec!(8.28));
        assert_eq!(result.debt_share, dec!(80));
        assert_eq!(result.tax_rate, dec!(25));
    }

    #[test]
    fn test_decomposition_sums_to_wacc() {
        let result = compute_wacc("USA", 2023, &Technology::SolarPv, &mature_solar_components())
            .unwrap();
        assert_eq!(result.contribution_sum(), result.wacc);
    }

    #[test]
    fn test_decomposition_splits_sovereign_risk_asymmetrically() {
        let mut components = mature_solar_components();
        components.country_risk_premium = dec!(4.0);
        components.default_spread = dec!(2.0);
        let result = compute_wacc("BRA", 2023, &Technology::SolarPv, &components).unwrap();

        // CDS on the after-tax debt leg, CRP on the equity leg:
        // 2.0 * 0.8 * 0.75 + 4.0 * 0.2 = 1.2 + 0.8 = 2.0
        assert_eq!(result.country_risk, dec!(2.0));
    }

    #[test]
    fn test_invalid_tax_rate_rejected() {
        let mut components = mature_solar_components();
        components.tax_rate = dec!(140);
        assert!(compute_wacc("USA", 2023, &Technology::SolarPv, &components).is_err());
    }

    #[test]
    fn test_invalid_debt_share_rejected() {
        let mut components = mature_solar_components();
        components.debt_share = dec!(-5);
        assert!(compute_wacc("USA", 2023, &Technology::SolarPv, &components).is_err());
    }

    #[test]
    fn test_rounded_presentation_form() {
        let mut components = mature_solar_components();
        components.country_risk_premium = dec!(5.123456);
        let result = compute_wacc("USA", 2023, &Technology::SolarPv, &components).unwrap();
        let rounded = result.rounded();

        assert_eq!(rounded.cost_of_equity, result.cost_of_equity.round_dp(2));
        assert_eq!(rounded.country_code, result.country_code);
        assert_eq!(rounded.year, result.year);
    }
}
