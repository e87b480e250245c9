//! Validation engine: field rules, row acceptance, and outcome aggregation.

mod field;
mod outcome;
mod patterns;
mod row;

pub use field::{evaluate, Violation};
pub use outcome::{AcceptedRow, FieldError, Outcome, RowResult};
pub use patterns::{is_email, is_phone, EMAIL_PATTERN, PHONE_PATTERN};
pub use row::{DatePolicy, RowValidator};
