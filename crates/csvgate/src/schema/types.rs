//! Core type definitions for column rules.

use serde::{Deserialize, Serialize};

/// Declared output type for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers, coerced leniently (non-numeric input becomes 0).
    Integer,
    /// Floating-point numbers, coerced leniently (non-numeric input becomes 0.0).
    Float,
    /// Calendar date.
    Date,
    /// Raw value passed through unchanged.
    #[default]
    String,
}
