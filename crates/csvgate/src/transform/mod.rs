//! Type coercion for accepted field values.

mod convert;

pub use convert::{convert, leading_float, leading_integer, parse_date, ConversionError, Value};
