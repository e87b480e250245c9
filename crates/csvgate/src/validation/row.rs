//! Row-level validation: every schema column, in order, for one row.

use serde::{Deserialize, Serialize};

use super::field::{evaluate, Violation};
use super::outcome::{AcceptedRow, FieldError, RowResult};
use crate::error::{GateError, Result};
use crate::input::RawRow;
use crate::schema::SchemaSpec;
use crate::transform::{convert, ConversionError};

/// What to do when a date column holds an unparsable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Abort the whole run with [`GateError::DateConversion`].
    #[default]
    Abort,
    /// Record `"<header> is not a valid date"` and reject the row.
    RecordError,
}

/// Validates and converts rows against a schema.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    schema: &'a SchemaSpec,
    date_policy: DatePolicy,
}

impl<'a> RowValidator<'a> {
    /// Create a validator that aborts on bad dates.
    pub fn new(schema: &'a SchemaSpec) -> Self {
        Self {
            schema,
            date_policy: DatePolicy::default(),
        }
    }

    /// Set the date failure policy.
    pub fn with_date_policy(mut self, date_policy: DatePolicy) -> Self {
        self.date_policy = date_policy;
        self
    }

    /// Validate one row.
    ///
    /// Every column is checked even after an earlier column fails, so a row
    /// yields one error per failing column in schema order. The row is
    /// accepted only if no column failed; otherwise its converted values are
    /// discarded.
    pub fn validate_row(&self, row: &RawRow) -> Result<RowResult> {
        let mut working = AcceptedRow::with_capacity(self.schema.len());
        let mut errors = Vec::new();

        for (header, rule) in self.schema.iter() {
            let raw = row.get(header);

            if let Some(rules) = rule.active_validations() {
                if let Err(violation) = evaluate(raw, rules) {
                    errors.push(FieldError::new(row.line, header, &violation));
                    continue;
                }
            }

            match convert(raw, rule.column_type) {
                Ok(value) => {
                    working.insert(rule.target_key.clone(), value);
                }
                Err(ConversionError::InvalidDate(value)) => match self.date_policy {
                    DatePolicy::Abort => {
                        return Err(GateError::DateConversion {
                            row: row.line,
                            column: header.to_string(),
                            value,
                        });
                    }
                    DatePolicy::RecordError => {
                        errors.push(FieldError::new(row.line, header, &Violation::Date));
                    }
                },
            }
        }

        let accepted = errors.is_empty().then_some(working);
        Ok(RowResult {
            line: row.line,
            accepted,
            errors,
        })
    }
}
