//! Evaluation of one column's rule set against one raw value.

use std::fmt;

use crate::schema::ValidationRules;
use crate::transform::leading_integer;

use super::patterns::{is_email, is_phone};

/// The first rule a field value failed.
///
/// `Display` renders the reason text that follows the header in a
/// [`FieldError`](super::FieldError) message.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Value absent or empty.
    Required,
    /// Fewer characters than the minimum.
    MinLength(usize),
    /// More characters than the maximum.
    MaxLength(usize),
    /// Not email-shaped.
    Email,
    /// Not a 10 or 11 digit number.
    Phone,
    /// Leading integer below the lower bound.
    Min(f64),
    /// Leading integer above the upper bound.
    Max(f64),
    /// Custom predicate rejected the value.
    Callback,
    /// Value could not be parsed as a date.
    Date,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => f.write_str("is required"),
            Violation::MinLength(n) => write!(f, "length must be >= {}", n),
            Violation::MaxLength(n) => write!(f, "length must be <= {}", n),
            Violation::Email => f.write_str("is not a valid email"),
            Violation::Phone => f.write_str("is not a valid phone number"),
            Violation::Min(n) => write!(f, "must be >= {}", n),
            Violation::Max(n) => write!(f, "must be <= {}", n),
            Violation::Callback => f.write_str("not valid"),
            Violation::Date => f.write_str("is not a valid date"),
        }
    }
}

/// Check a raw value against a column's rules.
///
/// Checks run in a fixed order and stop at the first failure: required,
/// min_length, max_length, email, phone, min, max, callback. An absent value
/// is only subject to `required`; an empty string is present and goes
/// through every check.
pub fn evaluate(raw: Option<&str>, rules: &ValidationRules) -> Result<(), Violation> {
    if rules.required && raw.is_none_or(str::is_empty) {
        return Err(Violation::Required);
    }

    let Some(value) = raw else {
        return Ok(());
    };

    if rules.min_length.is_some() || rules.max_length.is_some() {
        let length = value.chars().count();
        if let Some(min) = rules.min_length {
            if length < min {
                return Err(Violation::MinLength(min));
            }
        }
        if let Some(max) = rules.max_length {
            if length > max {
                return Err(Violation::MaxLength(max));
            }
        }
    }

    if rules.email && !is_email(value) {
        return Err(Violation::Email);
    }

    if rules.phone && !is_phone(value) {
        return Err(Violation::Phone);
    }

    if rules.min.is_some() || rules.max.is_some() {
        let number = leading_integer(value) as f64;
        if let Some(min) = rules.min {
            if number < min {
                return Err(Violation::Min(min));
            }
        }
        if let Some(max) = rules.max {
            if number > max {
                return Err(Violation::Max(max));
            }
        }
    }

    if let Some(callback) = &rules.callback {
        if !callback.test(value) {
            return Err(Violation::Callback);
        }
    }

    Ok(())
}
