use thiserror::Error;

use crate::types::Year;

#[derive(Debug, Error)]
pub enum FincoreError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing reference data: {series} has no value for {country} in {year}")]
    MissingReferenceData {
        series: String,
        country: String,
        year: Year,
    },

    #[error("Missing reference data: {series} does not cover year {year}")]
    MissingYear { series: String, year: Year },

    #[error("Unknown technology: {0}")]
    UnknownTechnology(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FincoreError {
    /// Shorthand for the most common lookup failure.
    pub fn missing(series: &str, country: &str, year: Year) -> Self {
        FincoreError::MissingReferenceData {
            series: series.to_string(),
            country: country.to_string(),
            year,
        }
    }
}

impl From<serde_json::Error> for FincoreError {
    fn from(e: serde_json::Error) -> Self {
        FincoreError::SerializationError(e.to_string())
    }
}
