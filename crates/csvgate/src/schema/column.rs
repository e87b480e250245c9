//! Rule for a single source column.

use super::rules::ValidationRules;
use super::types::ColumnType;

/// How one source column is validated and where its value lands.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    /// Key the converted value is stored under in an accepted row.
    pub target_key: String,
    /// Declared output type.
    pub column_type: ColumnType,
    /// Checks to run before conversion (None = accept any value).
    pub validations: Option<ValidationRules>,
}

impl ColumnRule {
    /// Create a string column with no validations.
    pub fn new(target_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            column_type: ColumnType::String,
            validations: None,
        }
    }

    /// Set the declared output type.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Attach validation rules.
    pub fn with_validations(mut self, validations: ValidationRules) -> Self {
        self.validations = Some(validations);
        self
    }

    /// Returns the rules to evaluate, skipping rule sets with no checks.
    pub fn active_validations(&self) -> Option<&ValidationRules> {
        self.validations.as_ref().filter(|v| !v.is_empty())
    }
}
