//! Ordered schema for a whole file.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::column::ColumnRule;
use crate::error::{GateError, Result};

/// Ordered mapping from source header to column rule.
///
/// Insertion order is the order columns are checked in, and therefore the
/// order of a row's errors.
#[derive(Debug, Clone, Default)]
pub struct SchemaSpec {
    columns: IndexMap<String, ColumnRule>,
}

impl SchemaSpec {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style. Re-adding a header replaces its rule in
    /// place.
    pub fn column(mut self, header: impl Into<String>, rule: ColumnRule) -> Self {
        self.insert(header, rule);
        self
    }

    /// Add or replace a column.
    pub fn insert(&mut self, header: impl Into<String>, rule: ColumnRule) {
        self.columns.insert(header.into(), rule);
    }

    /// Get the rule for a header.
    pub fn get(&self, header: &str) -> Option<&ColumnRule> {
        self.columns.get(header)
    }

    /// Iterate `(header, rule)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.columns.iter().map(|(h, r)| (h.as_str(), r))
    }

    /// Get all headers in schema order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.keys().map(|h| h.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check the schema shape before any row is read.
    ///
    /// Rejects empty schemas, blank target keys, and two headers writing to
    /// the same target key.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(GateError::Config("schema has no columns".to_string()));
        }

        let mut seen = HashSet::new();
        for (header, rule) in &self.columns {
            if rule.target_key.trim().is_empty() {
                return Err(GateError::Config(format!(
                    "column '{}' has an empty target key",
                    header
                )));
            }
            if !seen.insert(rule.target_key.as_str()) {
                return Err(GateError::Config(format!(
                    "target key '{}' is used by more than one column",
                    rule.target_key
                )));
            }
        }

        Ok(())
    }
}

impl<H: Into<String>> FromIterator<(H, ColumnRule)> for SchemaSpec {
    fn from_iter<I: IntoIterator<Item = (H, ColumnRule)>>(iter: I) -> Self {
        let mut schema = SchemaSpec::new();
        for (header, rule) in iter {
            schema.insert(header, rule);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, ValidationRules};

    #[test]
    fn test_preserves_insertion_order() {
        let schema = SchemaSpec::new()
            .column("ID", ColumnRule::new("id"))
            .column("タイトル", ColumnRule::new("title"))
            .column("量", ColumnRule::new("quantity").with_type(ColumnType::Integer));

        assert_eq!(schema.headers(), vec!["ID", "タイトル", "量"]);
        assert_eq!(schema.len(), 3);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let schema = SchemaSpec::new()
            .column("a", ColumnRule::new("a"))
            .column("b", ColumnRule::new("b"))
            .column("a", ColumnRule::new("alpha"));

        assert_eq!(schema.headers(), vec!["a", "b"]);
        assert_eq!(schema.get("a").unwrap().target_key, "alpha");
    }

    #[test]
    fn test_rejects_empty_schema() {
        assert!(matches!(SchemaSpec::new().validate(), Err(GateError::Config(_))));
    }

    #[test]
    fn test_rejects_blank_target_key() {
        let schema = SchemaSpec::new().column(
            "name",
            ColumnRule::new("  ").with_validations(ValidationRules::new().required()),
        );
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("empty target key"));
    }

    #[test]
    fn test_rejects_duplicate_target_key() {
        let schema: SchemaSpec = vec![
            ("first", ColumnRule::new("name")),
            ("second", ColumnRule::new("name")),
        ]
        .into_iter()
        .collect();

        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("more than one column"));
    }
}
