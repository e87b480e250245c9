//! Schema types describing how each column is validated and converted.

mod column;
mod rules;
mod table;
mod types;

pub use column::ColumnRule;
pub use rules::{Predicate, ValidationRules};
pub use table::SchemaSpec;
pub use types::ColumnType;
