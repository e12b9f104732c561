use serde::{Deserialize, Serialize};

/// Single failed assertion: which rule failed and a human-readable message.
///
/// The `msg` field name is part of the report wire shape and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionRecord {
    pub rule: String,
    pub msg: String,
}

impl AssertionRecord {
    pub fn new(rule: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            msg: msg.into(),
        }
    }
}

/// Ordered, append-only failure collection owned by one validation session.
///
/// Record order is assertion-invocation order; passing assertions add nothing.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ErrorReport {
    records: Vec<AssertionRecord>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, rule: &str, msg: impl Into<String>) {
        self.records.push(AssertionRecord::new(rule, msg));
    }

    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<AssertionRecord> {
        self.records
    }
}
