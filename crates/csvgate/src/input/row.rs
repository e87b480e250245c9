//! Header-keyed raw row.

use indexmap::IndexMap;

/// One data row as read from the file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number; the header is line 1.
    pub line: usize,
    /// Header to raw value. `None` marks an absent value.
    pub values: IndexMap<String, Option<String>>,
}

impl RawRow {
    /// Create a row with no values.
    pub fn new(line: usize) -> Self {
        Self {
            line,
            values: IndexMap::new(),
        }
    }

    /// Set a value, builder style.
    pub fn with(mut self, header: impl Into<String>, value: Option<&str>) -> Self {
        self.values.insert(header.into(), value.map(str::to_string));
        self
    }

    /// Get the raw value for a header.
    ///
    /// Headers missing from the row and absent values both return `None`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).and_then(|v| v.as_deref())
    }
}
