//! Accumulated result of a validation run.

use indexmap::IndexMap;
use serde::Serialize;

use super::field::Violation;
use crate::error::Result;
use crate::transform::Value;

/// An accepted row: target key to converted value, in schema order.
///
/// `None` records a column whose raw value was absent.
pub type AcceptedRow = IndexMap<String, Option<Value>>;

/// A rejected field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Line number of the row in the source file.
    pub row: usize,
    /// `"<header> <reason>"`.
    #[serde(rename = "msg")]
    pub message: String,
}

impl FieldError {
    /// Build the error for a header that failed a rule.
    pub fn new(row: usize, header: &str, violation: &Violation) -> Self {
        Self {
            row,
            message: format!("{} {}", header, violation),
        }
    }
}

/// Validation result for a single row.
///
/// Exactly one of `accepted` and `errors` is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    pub line: usize,
    pub accepted: Option<AcceptedRow>,
    pub errors: Vec<FieldError>,
}

impl RowResult {
    /// Returns true if the row passed every column.
    pub fn is_accepted(&self) -> bool {
        self.accepted.is_some()
    }
}

/// Accepted rows and field errors for a whole file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    pub results: Vec<AcceptedRow>,
    pub errors: Vec<FieldError>,
}

impl Outcome {
    /// Create an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row's result. Order is preserved; nothing is merged or
    /// deduplicated.
    pub fn append(&mut self, result: RowResult) {
        if let Some(row) = result.accepted {
            self.results.push(row);
        }
        self.errors.extend(result.errors);
    }

    /// Returns true if no field errors were recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of accepted rows.
    pub fn accepted_count(&self) -> usize {
        self.results.len()
    }

    /// Number of field errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Serialize as `{"results": [...], "errors": [{"row", "msg"}]}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
