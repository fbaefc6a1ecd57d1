//! Query orchestration: sources and aligns the reference tables for a
//! requested (year, technology, country-set), then hands resolved inputs to
//! the calculator.
//!
//! Every method is a pure function of its arguments plus the tables loaded at
//! construction; identical queries always produce identical tables.

mod historical;
mod projections;
mod resolve;

pub use projections::ProjectionAssumptions;
pub use resolve::ResolvedYearInputs;

use crate::calculator::Calculator;
use crate::reference::{
    CountryRiskTable, GdpProjectionTable, GenerationTable, InterestRateTable,
    RenewableTargetTable, TaxRateTable,
};
use crate::types::{Technology, Year};

/// Most recent historical year; projections extrapolate from here.
pub const PROJECTION_BASE_YEAR: Year = 2024;

/// First year produced by a projection query.
pub const FIRST_PROJECTION_YEAR: Year = 2025;

/// The reference tables a predictor is built over, in the shapes produced by
/// the external data-loading collaborator.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub country_risk: CountryRiskTable,
    pub generation: GenerationTable,
    pub tax_rates: TaxRateTable,
    pub interest_rates: InterestRateTable,
    pub renewable_targets: RenewableTargetTable,
    pub gdp_projections: GdpProjectionTable,
}

/// WACC predictor over immutable reference data.
#[derive(Debug, Clone)]
pub struct Predictor {
    data: ReferenceData,
    calculator: Calculator,
}

impl Predictor {
    pub fn new(data: ReferenceData, calculator: Calculator) -> Self {
        Predictor { data, calculator }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub(crate) fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Technologies the profile table knows about, for presentation-layer
    /// selectors.
    pub fn technologies(&self) -> impl Iterator<Item = &Technology> {
        self.calculator.profiles().technologies()
    }
}
