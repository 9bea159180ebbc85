//! Error types for roster operations.
//!
//! Inability to fill a slot is never an error: it is reported as a
//! [`ConflictReason`](crate::models::ConflictReason). Errors here cover
//! malformed input, configuration and export only.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The request failed structural validation.
    #[error("invalid schedule input: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// JSON request or response could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Export produced unusable output.
    #[error("Export error: {0}")]
    Export(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
