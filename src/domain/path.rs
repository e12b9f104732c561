use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Parsed dotted path (`Resources.MyBucket.Type`) addressing nested mapping keys.
///
/// Segments address object keys only; sequences are never indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplatePath {
    segments: Vec<String>,
}

impl TemplatePath {
    pub fn parse(input: &str) -> Result<Self, TemplatePathError> {
        if input.is_empty() {
            return Err(TemplatePathError::new(input, "path must not be empty"));
        }
        if input.split('.').any(str::is_empty) {
            return Err(TemplatePathError::new(input, "path segments must not be empty"));
        }
        Ok(Self {
            segments: input.split('.').map(ToOwned::to_owned).collect(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the addressed value, or `None` when a segment is missing or a
    /// non-mapping value is reached before the path is consumed.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        let mut current = document;
        for segment in &self.segments {
            match current {
                Value::Object(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.segments.join("."))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid path `{input}`: {reason}")]
pub struct TemplatePathError {
    input: String,
    reason: &'static str,
}

impl TemplatePathError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}
