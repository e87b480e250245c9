//! csvgate: schema-driven validation and type coercion for delimited files.
//!
//! A caller describes each source column with a [`ColumnRule`]: where its
//! value should land, what type it converts to, and which checks it must
//! pass. csvgate reads the file row by row, reports every failing field with
//! its line number, and returns the rows that passed every check with their
//! values converted.
//!
//! # Example
//!
//! ```no_run
//! use csvgate::{ColumnRule, ColumnType, SchemaSpec, ValidationRules};
//!
//! let schema = SchemaSpec::new()
//!     .column("ID", ColumnRule::new("id").with_validations(ValidationRules::new().required()))
//!     .column(
//!         "Quantity",
//!         ColumnRule::new("quantity")
//!             .with_type(ColumnType::Integer)
//!             .with_validations(ValidationRules::new().with_min(1).with_max(10)),
//!     );
//!
//! let outcome = csvgate::query("orders.csv", &schema).unwrap();
//!
//! println!("Accepted: {}", outcome.results.len());
//! for error in &outcome.errors {
//!     println!("line {}: {}", error.row, error.message);
//! }
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod transform;
pub mod validation;

mod gate;

pub use crate::gate::{query, CsvGate, GateConfig};
pub use error::{GateError, Result};
pub use input::{RawRow, ReaderConfig};
pub use schema::{ColumnRule, ColumnType, Predicate, SchemaSpec, ValidationRules};
pub use transform::Value;
pub use validation::{AcceptedRow, DatePolicy, FieldError, Outcome, Violation};
