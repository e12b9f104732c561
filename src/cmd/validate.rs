use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Value, json};

use crate::adapters::cfn_lint::{self, CfnLintError};
use crate::adapters::cfn_nag::{self, CfnNagError};
use crate::domain::error::{CheckFailure, LoadError, ValidationError};
use crate::domain::report::AssertionRecord;
use crate::engine::structure::{CfnStructure, JsonStructure};
use crate::engine::validator::JsonValidator;

/// Input arguments for validate command execution API. The `matches` and
/// `resources` entries carry raw `<path>=<json>` / `<name>=<type>` flag
/// values, parsed here so the CLI layer stays thin.
#[derive(Debug, Clone, Default)]
pub struct ValidateCommandArgs {
    pub template: PathBuf,
    pub exists: Vec<String>,
    pub not_empty: Vec<String>,
    pub matches: Vec<String>,
    pub resources: Vec<String>,
    pub outputs: Vec<String>,
    pub lint: bool,
    pub nag: bool,
}

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidateCommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

pub fn run(args: &ValidateCommandArgs) -> ValidateCommandResponse {
    match execute(args) {
        Ok(()) => ValidateCommandResponse {
            exit_code: 0,
            payload: json!({
                "template": args.template.display().to_string(),
                "matched": true,
                "errors": [],
            }),
        },
        Err(CommandError::Structure(records)) => ValidateCommandResponse {
            exit_code: 2,
            payload: json!({
                "template": args.template.display().to_string(),
                "matched": false,
                "errors": records,
            }),
        },
        Err(CommandError::InputUsage(message)) => ValidateCommandResponse {
            exit_code: 3,
            payload: json!({
                "error": "input_usage_error",
                "message": message,
            }),
        },
        Err(CommandError::Internal(message)) => ValidateCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": message,
            }),
        },
    }
}

fn execute(args: &ValidateCommandArgs) -> Result<(), CommandError> {
    let mut validator = JsonValidator::from_file(&args.template).map_err(map_load_error)?;
    register_checks(&mut validator, args)?;
    validator
        .assert_structure()
        .map_err(|error: ValidationError| CommandError::Structure(error.into_records()))?;
    run_external_tools(args)
}

fn register_checks(
    validator: &mut JsonValidator,
    args: &ValidateCommandArgs,
) -> Result<(), CommandError> {
    let document = validator.document().clone();

    for path in &args.exists {
        let doc = document.clone();
        let path = path.clone();
        validator.register("exists", move || {
            let mut structure = JsonStructure::new(&doc);
            structure.exists(&path);
            first_failure(structure.errors())
        });
    }

    for path in &args.not_empty {
        let doc = document.clone();
        let path = path.clone();
        validator.register("not_empty", move || {
            let mut structure = JsonStructure::new(&doc);
            structure.not_empty(&path);
            first_failure(structure.errors())
        });
    }

    for raw in &args.matches {
        let (path, expected) = parse_match_flag(raw)?;
        let doc = document.clone();
        validator.register("match", move || {
            let mut structure = JsonStructure::new(&doc);
            structure.matches(&path, &expected);
            first_failure(structure.errors())
        });
    }

    for raw in &args.resources {
        let (name, expected_type) = split_flag(raw, "--resource", "<name>=<type>")?;
        let doc = document.clone();
        validator.register("resource", move || {
            let mut structure = CfnStructure::new(&doc);
            structure.resource(&name, &expected_type);
            first_failure(structure.errors())
        });
    }

    for name in &args.outputs {
        let doc = document.clone();
        let name = name.clone();
        validator.register("output", move || {
            let mut structure = CfnStructure::new(&doc);
            structure.output(&name);
            first_failure(structure.errors())
        });
    }

    Ok(())
}

fn run_external_tools(args: &ValidateCommandArgs) -> Result<(), CommandError> {
    if args.lint {
        cfn_lint::cfn_lint_test(&args.template).map_err(|error| match error {
            CfnLintError::Unavailable => CommandError::InputUsage(error.to_string()),
            CfnLintError::Spawn(_) => CommandError::Internal(error.to_string()),
            CfnLintError::Violation { .. } => {
                CommandError::Structure(vec![AssertionRecord::new("cfn_lint", error.to_string())])
            }
        })?;
    }
    if args.nag {
        cfn_nag::cfn_nag_test(&args.template).map_err(|error| match error {
            CfnNagError::Unavailable => CommandError::InputUsage(error.to_string()),
            CfnNagError::Spawn(_) => CommandError::Internal(error.to_string()),
            CfnNagError::Violation { .. } => {
                CommandError::Structure(vec![AssertionRecord::new("cfn_nag", error.to_string())])
            }
        })?;
    }
    Ok(())
}

fn first_failure(records: &[AssertionRecord]) -> Result<(), CheckFailure> {
    match records.first() {
        Some(record) => Err(CheckFailure::new(record.msg.clone())),
        None => Ok(()),
    }
}

fn parse_match_flag(raw: &str) -> Result<(String, Value), CommandError> {
    let (path, encoded) = split_flag(raw, "--match", "<path>=<json>")?;
    let expected = serde_json::from_str(&encoded).map_err(|error| {
        CommandError::InputUsage(format!(
            "invalid --match value `{raw}`: expected value is not valid JSON: {error}"
        ))
    })?;
    Ok((path, expected))
}

fn split_flag(raw: &str, flag: &str, shape: &str) -> Result<(String, String), CommandError> {
    match raw.split_once('=') {
        Some((left, right)) if !left.is_empty() => Ok((left.to_string(), right.to_string())),
        _ => Err(CommandError::InputUsage(format!(
            "invalid {flag} value `{raw}`: expected {shape}"
        ))),
    }
}

fn map_load_error(error: LoadError) -> CommandError {
    match error {
        LoadError::NotFound { .. } | LoadError::InvalidJson { .. } => {
            CommandError::InputUsage(error.to_string())
        }
        LoadError::Read { .. } => CommandError::Internal(error.to_string()),
    }
}

enum CommandError {
    InputUsage(String),
    Structure(Vec<AssertionRecord>),
    Internal(String),
}
