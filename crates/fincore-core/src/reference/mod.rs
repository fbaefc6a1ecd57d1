//! Immutable reference tables backing every query.
//!
//! Each table is built once from the plain record vectors produced by the
//! external data-loading collaborator and is read-only afterwards. All lookups
//! are keyed by typed (country code, integer year) pairs.

pub mod country_risk;
pub mod fiscal;
pub mod generation;
pub mod projections;
pub mod technology;

pub use country_risk::{CountryRiskRecord, CountryRiskTable, ERP_SENTINEL};
pub use fiscal::{InterestRateRecord, InterestRateTable, TaxRecord, TaxRateTable};
pub use generation::{GenerationRecord, GenerationTable, PenetrationLookup};
pub use projections::{
    GdpProjectionRecord, GdpProjectionTable, GdpRatio, RenewableTarget, RenewableTargetRecord,
    RenewableTargetTable,
};
pub use technology::{TechnologyProfile, TechnologyProfiles};
