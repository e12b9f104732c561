use thiserror::Error;

use crate::domain::report::AssertionRecord;

/// Errors produced while loading a template file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Target path does not exist. The display string is part of the
    /// validator contract consumed by test harnesses.
    #[error("{path} not found")]
    NotFound { path: String },

    /// File exists but its contents do not parse as JSON.
    #[error("{path} is not a valid JSON")]
    InvalidJson { path: String },

    /// File exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure raised by a registered structure check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CheckFailure {
    message: String,
}

impl CheckFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Aggregate failure from `assert_structure`: the display string is the
/// JSON-encoded ordered array of `{rule, msg}` records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", serde_json::to_string(.records).unwrap_or_else(|_| "<serialization-error>".to_string()))]
pub struct ValidationError {
    records: Vec<AssertionRecord>,
}

impl ValidationError {
    pub fn new(records: Vec<AssertionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AssertionRecord> {
        self.records
    }
}
