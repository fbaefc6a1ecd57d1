//! Country-level cost-of-capital estimation for renewable energy
//! technologies.
//!
//! Two layers compose the crate. The [`calculator`] is the pure computation
//! leaf: fully-resolved macro and financial inputs in, a decomposed WACC
//! estimate out. The [`predictor`] orchestrates it: it aligns the
//! [`reference`] tables for a requested (year, technology, country-set),
//! fills or rejects gaps per series-specific policy, and extrapolates inputs
//! for projection queries. All arithmetic uses `rust_decimal::Decimal`.
//!
//! Parsing source spreadsheets into the [`reference`] record shapes, and
//! rendering the returned tables, are the callers' concerns.

pub mod calculator;
pub mod error;
pub mod predictor;
pub mod reference;
pub mod types;

pub use error::FincoreError;
pub use types::*;

/// Standard result type for all fincore operations
pub type FincoreResult<T> = Result<T, FincoreError>;
