use serde_json::Value;

use crate::domain::path::TemplatePath;
use crate::domain::report::{AssertionRecord, ErrorReport};

/// Batched structural assertions over one parsed JSON document.
///
/// Every assertion evaluates independently: a failure appends exactly one
/// record to the session report and never interrupts later assertions. One
/// instance covers one document; reuse across documents would mix up error
/// attribution.
#[derive(Debug)]
pub struct JsonStructure<'a> {
    document: &'a Value,
    report: ErrorReport,
}

impl<'a> JsonStructure<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self {
            document,
            report: ErrorReport::new(),
        }
    }

    /// Passes iff the path resolves to any value, including `null`.
    pub fn exists(&mut self, path: &str) {
        if self.resolve(path).is_none() {
            self.report.record("exists", format!("{path} does not exist"));
        }
    }

    /// Fails for an absent path, `null`, an empty sequence, or an empty
    /// mapping. Emptiness is structural: `0`, `false`, and `""` all pass.
    pub fn not_empty(&mut self, path: &str) {
        let empty = match self.resolve(path) {
            None | Some(Value::Null) => true,
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => false,
        };
        if empty {
            self.report.record("not_empty", format!("{path} is empty"));
        }
    }

    /// Exact structural equality, scalar or nested container; an absent path
    /// is a mismatch.
    pub fn matches(&mut self, path: &str, expected: &Value) {
        match self.resolve(path) {
            Some(actual) if actual == expected => {}
            _ => self
                .report
                .record("match", format!("{path} does not equal {expected}")),
        }
    }

    /// Requires a sized value (sequence, mapping, or string) with exactly
    /// `expected` entries.
    pub fn len(&mut self, path: &str, expected: usize) {
        if self.resolve(path).and_then(container_len) != Some(expected) {
            self.report
                .record("len", format!("length of {path} is not {expected}"));
        }
    }

    /// Read-only view of the failures accumulated so far.
    pub fn errors(&self) -> &[AssertionRecord] {
        self.report.records()
    }

    fn resolve(&self, path: &str) -> Option<&'a Value> {
        // A path that does not parse cannot address anything.
        TemplatePath::parse(path).ok()?.resolve(self.document)
    }
}

fn container_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::String(text) => Some(text.chars().count()),
        _ => None,
    }
}
