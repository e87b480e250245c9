//! Main CsvGate struct and public API.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};
use crate::input::{ReaderConfig, RowReader};
use crate::schema::SchemaSpec;
use crate::validation::{DatePolicy, Outcome, RowValidator};

/// Configuration for a validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Reader configuration.
    pub reader: ReaderConfig,
    /// How unparsable dates are handled.
    pub date_policy: DatePolicy,
}

/// Validates delimited files against a schema.
///
/// Holds no state between runs: validating the same input twice yields
/// identical outcomes.
#[derive(Debug, Clone, Default)]
pub struct CsvGate {
    config: GateConfig,
}

impl CsvGate {
    /// Create a CsvGate with default configuration.
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    /// Create a CsvGate with custom configuration.
    pub fn with_config(config: GateConfig) -> Self {
        Self { config }
    }

    /// Set the date failure policy.
    pub fn with_date_policy(mut self, date_policy: DatePolicy) -> Self {
        self.config.date_policy = date_policy;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Validate a file.
    ///
    /// Fails with [`GateError::FileNotFound`] before anything is read if the
    /// path is not an existing file. The file is closed on every return path.
    pub fn query(&self, path: impl AsRef<Path>, schema: &SchemaSpec) -> Result<Outcome> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(GateError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        schema.validate()?;

        let file = File::open(path).map_err(|e| GateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), columns = schema.len(), "validating file");
        self.run(file, schema)
    }

    /// Validate delimited data from any reader.
    pub fn validate_reader(&self, source: impl Read, schema: &SchemaSpec) -> Result<Outcome> {
        schema.validate()?;
        self.run(source, schema)
    }

    fn run(&self, source: impl Read, schema: &SchemaSpec) -> Result<Outcome> {
        let rows = RowReader::new(source, &self.config.reader)?;
        let validator = RowValidator::new(schema).with_date_policy(self.config.date_policy);
        let mut outcome = Outcome::new();

        for row in rows {
            let row = row?;
            let result = validator.validate_row(&row).inspect_err(|e| {
                tracing::warn!(line = row.line, error = %e, "aborting validation run");
            })?;

            if !result.is_accepted() {
                tracing::trace!(line = row.line, errors = result.errors.len(), "row rejected");
            }
            outcome.append(result);
        }

        tracing::debug!(
            accepted = outcome.accepted_count(),
            errors = outcome.error_count(),
            "validation complete"
        );
        Ok(outcome)
    }
}

/// Validate a file with the default configuration.
///
/// Shorthand for `CsvGate::new().query(path, schema)`.
pub fn query(path: impl AsRef<Path>, schema: &SchemaSpec) -> Result<Outcome> {
    CsvGate::new().query(path, schema)
}
