//! Pure computation layer: given fully-resolved inputs for one or many
//! countries, decompose the cost of capital. No data sourcing, no
//! time-series logic.

pub mod debt_share;
pub mod maturity;
pub mod wacc;

use rust_decimal_macros::dec;

use crate::reference::TechnologyProfiles;
use crate::types::Pct;

/// Default lenders' margin (%) on the debt leg.
pub const DEFAULT_LENDERS_MARGIN: Pct = dec!(2);

/// WACC calculator over a fixed set of technology profiles.
#[derive(Debug, Clone)]
pub struct Calculator {
    profiles: TechnologyProfiles,
    lenders_margin: Pct,
    strict: bool,
}

impl Calculator {
    pub fn new(profiles: TechnologyProfiles) -> Self {
        Calculator {
            profiles,
            lenders_margin: DEFAULT_LENDERS_MARGIN,
            strict: false,
        }
    }

    /// Override the flat lenders' margin assumption.
    pub fn with_lenders_margin(mut self, lenders_margin: Pct) -> Self {
        self.lenders_margin = lenders_margin;
        self
    }

    /// Treat technologies without a profile as an error instead of pricing
    /// them off the generic fallback profile.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn lenders_margin(&self) -> Pct {
        self.lenders_margin
    }

    pub fn profiles(&self) -> &TechnologyProfiles {
        &self.profiles
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }
}
