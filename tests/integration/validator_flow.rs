use cfncheck::domain::error::CheckFailure;
use cfncheck::engine::structure::{CfnStructure, JsonStructure};
use cfncheck::engine::validator::JsonValidator;
use serde_json::{Value, json};
use tempfile::tempdir;

#[test]
fn load_failures_carry_exact_messages() {
    let dir = tempdir().expect("tempdir");
    let template_path = dir.path().join("template.json");

    let error = JsonValidator::from_file(&template_path).expect_err("missing file");
    assert_eq!(
        error.to_string(),
        format!("{} not found", template_path.display())
    );

    std::fs::write(&template_path, "").expect("create empty file");
    let error = JsonValidator::from_file(&template_path).expect_err("empty file");
    assert_eq!(
        error.to_string(),
        format!("{} is not a valid JSON", template_path.display())
    );
}

#[test]
fn validator_without_checks_passes() {
    let dir = tempdir().expect("tempdir");
    let template_path = dir.path().join("template.json");
    std::fs::write(&template_path, r#"{"key": "value"}"#).expect("write template");

    let validator = JsonValidator::from_file(&template_path).expect("load");
    validator.assert_structure().expect("no registered checks");
}

#[test]
fn single_failing_check_raises_parseable_payload() {
    let mut validator = JsonValidator::from_document(json!({"key": "value"}));
    validator.register("validator_func", || Err(CheckFailure::new("Text")));

    let error = validator.assert_structure().expect_err("must fail");
    let payload: Value = serde_json::from_str(&error.to_string()).expect("payload json");
    assert_eq!(payload, json!([{"rule": "validator_func", "msg": "Text"}]));
}

#[test]
fn structure_checks_bound_to_loaded_document_batch_in_order() {
    let dir = tempdir().expect("tempdir");
    let template_path = dir.path().join("template.json");
    std::fs::write(
        &template_path,
        r#"{
            "Resources": {"TestResource": {"Type": "TestType"}},
            "Output": {"TestOutput": {"Property": "Value"}}
        }"#,
    )
    .expect("write template");

    let mut validator = JsonValidator::from_file(&template_path).expect("load");
    let document = validator.document().clone();

    let doc = document.clone();
    validator.register("check_resource", move || {
        let mut structure = CfnStructure::new(&doc);
        structure.resource("MissingResource", "TestType");
        match structure.errors().first() {
            Some(record) => Err(CheckFailure::new(record.msg.clone())),
            None => Ok(()),
        }
    });

    let doc = document.clone();
    validator.register("check_output", move || {
        let mut structure = CfnStructure::new(&doc);
        structure.output("TestOutput");
        match structure.errors().first() {
            Some(record) => Err(CheckFailure::new(record.msg.clone())),
            None => Ok(()),
        }
    });

    let doc = document.clone();
    validator.register("check_property", move || {
        let mut structure = JsonStructure::new(&doc);
        structure.matches("Output.TestOutput.Property", &json!("Other"));
        match structure.errors().first() {
            Some(record) => Err(CheckFailure::new(record.msg.clone())),
            None => Ok(()),
        }
    });

    let error = validator.assert_structure().expect_err("two checks fail");
    let records = error.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].rule, "check_resource");
    assert_eq!(records[1].rule, "check_property");
}

#[test]
fn check_with_many_internal_assertions_records_one_failure() {
    let mut validator = JsonValidator::from_document(json!({"a": 1}));
    let document = validator.document().clone();

    validator.register("multi_assert", move || {
        let mut structure = JsonStructure::new(&document);
        structure.exists("missing.one");
        structure.exists("missing.two");
        structure.exists("missing.three");
        match structure.errors().first() {
            Some(record) => Err(CheckFailure::new(record.msg.clone())),
            None => Ok(()),
        }
    });

    let error = validator.assert_structure().expect_err("must fail");
    assert_eq!(error.records().len(), 1);
    assert_eq!(error.records()[0].rule, "multi_assert");
}
