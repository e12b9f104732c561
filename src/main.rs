use std::path::PathBuf;
use std::process;

use cfncheck::cmd::validate::{self, ValidateCommandArgs};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Parser)]
#[command(
    name = "cfncheck",
    version,
    about = "Declarative structure checks for JSON documents and CloudFormation templates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a template file against declared structure checks.
    Validate(ValidateArgs),
}

#[derive(Debug, clap::Args)]
struct ValidateArgs {
    /// Template file to check.
    #[arg(long)]
    template: PathBuf,

    /// Dotted path that must resolve to a value.
    #[arg(long = "exists", value_name = "PATH")]
    exists: Vec<String>,

    /// Dotted path that must resolve to a non-empty value.
    #[arg(long = "not-empty", value_name = "PATH")]
    not_empty: Vec<String>,

    /// Equality check, `<path>=<json>`.
    #[arg(long = "match", value_name = "PATH=JSON")]
    matches: Vec<String>,

    /// CloudFormation resource type check, `<name>=<type>`.
    #[arg(long = "resource", value_name = "NAME=TYPE")]
    resources: Vec<String>,

    /// CloudFormation output that must be declared.
    #[arg(long = "output", value_name = "NAME")]
    outputs: Vec<String>,

    /// Run cfn-lint against the template.
    #[arg(long, default_value_t = false)]
    lint: bool,

    /// Run cfn_nag against the template.
    #[arg(long, default_value_t = false)]
    nag: bool,
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    match cli.command {
        Commands::Validate(args) => run_validate(args),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_validate(args: ValidateArgs) -> i32 {
    let command_args = ValidateCommandArgs {
        template: args.template,
        exists: args.exists,
        not_empty: args.not_empty,
        matches: args.matches,
        resources: args.resources,
        outputs: args.outputs,
        lint: args.lint,
        nag: args.nag,
    };
    let response = validate::run(&command_args);

    match response.exit_code {
        0 | 2 => {
            if emit_json_stdout(&response.payload) {
                response.exit_code
            } else {
                emit_error(
                    "internal_error",
                    "failed to serialize validate response".to_string(),
                    json!({"command": "validate"}),
                    1,
                );
                1
            }
        }
        _ => {
            if emit_json_stderr(&response.payload) {
                response.exit_code
            } else {
                emit_error(
                    "internal_error",
                    "failed to serialize validate error".to_string(),
                    json!({"command": "validate"}),
                    1,
                );
                1
            }
        }
    }
}

fn emit_json_stdout(payload: &Value) -> bool {
    match serde_json::to_string(payload) {
        Ok(serialized) => {
            println!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_json_stderr(payload: &Value) -> bool {
    match serde_json::to_string(payload) {
        Ok(serialized) => {
            eprintln!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_error(error: &'static str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(r#"{{"error":"internal_error"}}"#),
    }
}
