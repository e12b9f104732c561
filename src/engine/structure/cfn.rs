use serde_json::Value;

use crate::domain::report::AssertionRecord;
use crate::engine::structure::json::JsonStructure;

/// CloudFormation-flavored assertions composed over [`JsonStructure`].
///
/// All failures land in the inner structure's report; `errors` exposes that
/// same sequence.
#[derive(Debug)]
pub struct CfnStructure<'a> {
    inner: JsonStructure<'a>,
}

impl<'a> CfnStructure<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self {
            inner: JsonStructure::new(document),
        }
    }

    /// Asserts `Resources.<name>.Type` equals `expected_type`. A missing
    /// resource and a wrong-type resource both record one `match` failure.
    pub fn resource(&mut self, name: &str, expected_type: &str) {
        self.inner.matches(
            &format!("Resources.{name}.Type"),
            &Value::String(expected_type.to_string()),
        );
    }

    /// Asserts an entry exists under the top-level `Output` mapping. The
    /// surrounding tooling emits the singular `Output` key, not the
    /// CloudFormation-conventional `Outputs`.
    pub fn output(&mut self, name: &str) {
        self.inner.exists(&format!("Output.{name}"));
    }

    pub fn errors(&self) -> &[AssertionRecord] {
        self.inner.errors()
    }
}
