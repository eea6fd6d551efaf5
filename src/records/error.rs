//! Record error types

use thiserror::Error;

/// Errors raised while decoding a fetched record set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Top-level document was not a JSON array
    #[error("Expected an array of records, got {0}")]
    NotAnArray(&'static str),

    /// Body was not JSON at all
    #[error("Malformed JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Json(err.to_string())
    }
}

/// Errors raised while turning form input into a mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// Field name does not belong to the form
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Score text could not be read as a number
    #[error("Score {field} is not a number: {value:?}")]
    InvalidScore { field: &'static str, value: String },
}
