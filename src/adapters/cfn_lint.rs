use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CfnLintError {
    #[error("`cfn-lint` is not available in PATH")]
    Unavailable,
    #[error("failed to spawn cfn-lint: {0}")]
    Spawn(std::io::Error),
    #[error("cfn-lint reported findings for `{path}`: {findings}")]
    Violation { path: String, findings: String },
}

/// Runs `cfn-lint` against a template file and fails on any finding.
///
/// The binary can be overridden via `CFNCHECK_CFN_LINT_BIN`.
pub fn cfn_lint_test(template: impl AsRef<Path>) -> Result<(), CfnLintError> {
    let template = template.as_ref();
    let lint_bin =
        std::env::var("CFNCHECK_CFN_LINT_BIN").unwrap_or_else(|_| "cfn-lint".to_string());
    let output = match Command::new(&lint_bin)
        .arg("--format")
        .arg("json")
        .arg("--")
        .arg(template)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(output) => output,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CfnLintError::Unavailable);
        }
        Err(err) => return Err(CfnLintError::Spawn(err)),
    };

    if output.status.success() {
        return Ok(());
    }

    Err(CfnLintError::Violation {
        path: template.display().to_string(),
        findings: findings_text(&output.stdout, &output.stderr),
    })
}

fn findings_text(stdout: &[u8], stderr: &[u8]) -> String {
    let source = if stdout.is_empty() { stderr } else { stdout };
    String::from_utf8(source.to_vec())
        .unwrap_or_else(|_| "failed to decode cfn-lint output".to_string())
        .trim()
        .to_string()
}
