//! Conversion of accepted raw values to their declared types.
//!
//! Numeric coercion is lenient: a value with no leading number converts to
//! zero instead of failing. Dates are strict and report a
//! [`ConversionError`], which the row validator handles according to the
//! configured [`DatePolicy`](crate::DatePolicy).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::schema::ColumnType;

/// Date formats tried in order. Day-first forms only; `02/17/2025` is
/// rejected rather than guessed.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Date-time formats whose date part is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// A converted field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    String(String),
}

impl Value {
    /// Get the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a date, if it is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::String(s) => f.write_str(s),
        }
    }
}

/// Failure to convert a raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("cannot parse {0:?} as a date")]
    InvalidDate(String),
}

/// Convert a raw value to the declared column type.
///
/// Absent values stay absent.
pub fn convert(
    raw: Option<&str>,
    column_type: ColumnType,
) -> Result<Option<Value>, ConversionError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value = match column_type {
        ColumnType::Integer => Value::Integer(leading_integer(raw)),
        ColumnType::Float => Value::Float(leading_float(raw)),
        ColumnType::Date => match parse_date(raw) {
            Some(date) => Value::Date(date),
            None => return Err(ConversionError::InvalidDate(raw.to_string())),
        },
        ColumnType::String => Value::String(raw.to_string()),
    };

    Ok(Some(value))
}

/// Parse the integer at the start of a string.
///
/// Leading whitespace and a sign are accepted, and single underscores may
/// separate digits. Anything after the digits is ignored; a string with no
/// leading digits yields 0. Out-of-range values saturate.
pub fn leading_integer(raw: &str) -> i64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let end = skip_digits(bytes, start);
    let mut value: i64 = 0;
    for &b in &bytes[start..end] {
        if b == b'_' {
            continue;
        }
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

/// Parse the floating-point number at the start of a string.
///
/// Accepts an optional sign, digits, a fractional part, and an exponent.
/// A string with no leading number yields 0.0.
pub fn leading_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_end = skip_digits(bytes, sign_len);
    let mut end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, int_end + 1);
        if frac_end > int_end + 1 {
            end = frac_end;
        }
    }
    if end == sign_len {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = skip_digits(bytes, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].replace('_', "").parse().unwrap_or(0.0)
}

/// Parse a calendar date from the supported formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Compact YYYYMMDD
    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let year = trimmed[0..4].parse().ok()?;
        let month = trimmed[4..6].parse().ok()?;
        let day = trimmed[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Advance past a run of ASCII digits, allowing single underscores between
/// digits. Returns the index of the first byte not consumed.
fn skip_digits(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => i += 1,
            b'_' if i > start
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) =>
            {
                i += 1
            }
            _ => break,
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("10"), 10);
        assert_eq!(leading_integer("abc"), 0);
        assert_eq!(leading_integer(""), 0);
        assert_eq!(leading_integer("  42 apples"), 42);
        assert_eq!(leading_integer("-7"), -7);
        assert_eq!(leading_integer("+3"), 3);
        assert_eq!(leading_integer("1_000"), 1000);
        assert_eq!(leading_integer("1__0"), 1);
        assert_eq!(leading_integer("12.9"), 12);
        assert_eq!(leading_integer("-"), 0);
    }

    #[test]
    fn test_leading_integer_saturates() {
        assert_eq!(leading_integer("99999999999999999999999"), i64::MAX);
        assert_eq!(leading_integer("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("3.14"), 3.14);
        assert_eq!(leading_float("abc"), 0.0);
        assert_eq!(leading_float(".5"), 0.5);
        assert_eq!(leading_float("-2.5kg"), -2.5);
        assert_eq!(leading_float("1e3"), 1000.0);
        assert_eq!(leading_float("1e"), 1.0);
        assert_eq!(leading_float("1.e5"), 1.0);
        assert_eq!(leading_float("2.5E-1"), 0.25);
        assert_eq!(leading_float("1_000.5"), 1000.5);
        assert_eq!(leading_float("."), 0.0);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        for input in [
            "2025-02-17",
            "2025/02/17",
            "20250217",
            "17/02/2025",
            "17-02-2025",
            "17.02.2025",
            "17 February 2025",
            "17 Feb 2025",
            "February 17 2025",
            "Feb 17, 2025",
            "2025-02-17T10:30:00",
            "2025-02-17T10:30:00+09:00",
            " 2025-02-17 ",
        ] {
            assert_eq!(parse_date(input), Some(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_date_rejects() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("02/17/2025"), None);
        assert_eq!(parse_date("20251399"), None);
    }

    #[test]
    fn test_convert_types() {
        assert_eq!(
            convert(Some("10"), ColumnType::Integer),
            Ok(Some(Value::Integer(10)))
        );
        assert_eq!(
            convert(Some("abc"), ColumnType::Integer),
            Ok(Some(Value::Integer(0)))
        );
        assert_eq!(
            convert(Some("1.5"), ColumnType::Float),
            Ok(Some(Value::Float(1.5)))
        );
        assert_eq!(
            convert(Some("x"), ColumnType::String),
            Ok(Some(Value::String("x".to_string())))
        );
        assert_eq!(convert(None, ColumnType::Date), Ok(None));
    }

    #[test]
    fn test_convert_bad_date() {
        assert_eq!(
            convert(Some("soon"), ColumnType::Date),
            Err(ConversionError::InvalidDate("soon".to_string()))
        );
    }

    #[test]
    fn test_value_serializes_untagged() {
        let values = vec![
            Value::Integer(3),
            Value::Float(1.5),
            Value::Date(NaiveDate::from_ymd_opt(2025, 2, 17).unwrap()),
            Value::String("a".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[3,1.5,"2025-02-17","a"]"#);
    }
}
