//! Input reading and raw row representation.

mod reader;
mod row;

pub use reader::{ReaderConfig, RowReader, FIRST_DATA_LINE};
pub use row::RawRow;
