//! Debt share rules: riskier countries finance with less debt.
//!
//! Two normalizations coexist. Batch queries scale a country's CRP against
//! the maximum CRP of the requested country set; single-country queries use a
//! fixed divisor of 25. The asymmetry is inherited from the call sites that
//! depend on each path and must not be unified without product guidance.

use rust_decimal_macros::dec;

use crate::error::FincoreError;
use crate::types::Pct;
use crate::FincoreResult;

/// Fixed CRP normalizer for the single-country rule.
pub const INDIVIDUAL_CRP_NORMALIZER: Pct = dec!(25);

const CEILING: Pct = dec!(80);
const SPAN: Pct = dec!(40);

/// Batch rule: `80 - 40 * (crp / max_crp)`, with `max_crp` taken across the
/// current request's country set. A zero maximum puts the whole set at the
/// 80% ceiling.
pub fn debt_share_batch(crp: Pct, max_crp: Pct) -> FincoreResult<Pct> {
    if max_crp < Pct::ZERO {
        return Err(FincoreError::InvalidInput {
            field: "max_crp".into(),
            reason: format!("maximum CRP cannot be negative, got {max_crp}"),
        });
    }
    if max_crp.is_zero() {
        return Ok(CEILING);
    }
    Ok(CEILING - SPAN * (crp / max_crp))
}

/// Single-country rule: `80 - 40 * (crp / 25)`.
pub fn debt_share_individual(crp: Pct) -> Pct {
    CEILING - SPAN * (crp / INDIVIDUAL_CRP_NORMALIZER)
}
