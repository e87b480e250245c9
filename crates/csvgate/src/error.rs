//! Error types for the csvgate library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csvgate operations.
///
/// Field-level validation failures are not errors: they are recorded in the
/// [`Outcome`](crate::Outcome) and processing continues. Every variant here
/// aborts the run and no partial outcome is returned.
#[derive(Debug, Error)]
pub enum GateError {
    /// The input path does not reference an existing file.
    #[error("CSV file not found: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// Error reading or accessing a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A date column held a value that could not be parsed.
    #[error("Invalid date at row {row}, column '{column}': {value:?}")]
    DateConversion {
        row: usize,
        column: String,
        value: String,
    },

    /// Malformed schema or reader configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty input where data was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for csvgate operations.
pub type Result<T> = std::result::Result<T, GateError>;
