use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::domain::error::{CheckFailure, LoadError, ValidationError};
use crate::domain::report::ErrorReport;

/// Named zero-argument structure check registered on a [`JsonValidator`].
struct Check {
    rule: String,
    run: Box<dyn Fn() -> Result<(), CheckFailure>>,
}

/// Loads a JSON document from a file and runs a batch of registered checks
/// with unified failure reporting.
///
/// Checks run in registration order; each failing check contributes exactly
/// one `{rule, msg}` record to the aggregate error, regardless of how many
/// conditions it inspects internally.
pub struct JsonValidator {
    document: Value,
    checks: Vec<Check>,
}

impl JsonValidator {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                LoadError::Read {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
        let document = serde_json::from_str(&contents).map_err(|_| LoadError::InvalidJson {
            path: path.display().to_string(),
        })?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Value) -> Self {
        Self {
            document,
            checks: Vec::new(),
        }
    }

    /// The parsed document, for binding checks to its contents.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Registers a check; `rule` becomes the report identifier if it fails.
    pub fn register<F>(&mut self, rule: impl Into<String>, check: F)
    where
        F: Fn() -> Result<(), CheckFailure> + 'static,
    {
        self.checks.push(Check {
            rule: rule.into(),
            run: Box::new(check),
        });
    }

    /// Runs every registered check, then fails once with the full ordered
    /// batch if any check failed. Zero registered checks always succeed.
    pub fn assert_structure(&self) -> Result<(), ValidationError> {
        let mut report = ErrorReport::new();
        for check in &self.checks {
            if let Err(failure) = (check.run)() {
                report.record(&check.rule, failure.message());
            }
        }
        if report.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(report.into_records()))
        }
    }
}

impl fmt::Debug for JsonValidator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonValidator")
            .field("document", &self.document)
            .field("checks", &self.checks.len())
            .finish()
    }
}
