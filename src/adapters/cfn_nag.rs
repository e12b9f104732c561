use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CfnNagError {
    #[error("`cfn_nag_scan` is not available in PATH")]
    Unavailable,
    #[error("failed to spawn cfn_nag_scan: {0}")]
    Spawn(std::io::Error),
    #[error("cfn_nag reported findings for `{path}`: {findings}")]
    Violation { path: String, findings: String },
}

/// Runs `cfn_nag_scan` against a template file and fails on any finding.
///
/// The binary can be overridden via `CFNCHECK_CFN_NAG_BIN`.
pub fn cfn_nag_test(template: impl AsRef<Path>) -> Result<(), CfnNagError> {
    let template = template.as_ref();
    let nag_bin =
        std::env::var("CFNCHECK_CFN_NAG_BIN").unwrap_or_else(|_| "cfn_nag_scan".to_string());
    let output = match Command::new(&nag_bin)
        .arg("--output-format")
        .arg("json")
        .arg("--input-path")
        .arg(template)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(output) => output,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CfnNagError::Unavailable);
        }
        Err(err) => return Err(CfnNagError::Spawn(err)),
    };

    if output.status.success() {
        return Ok(());
    }

    Err(CfnNagError::Violation {
        path: template.display().to_string(),
        findings: findings_text(&output.stdout, &output.stderr),
    })
}

fn findings_text(stdout: &[u8], stderr: &[u8]) -> String {
    let source = if stdout.is_empty() { stderr } else { stdout };
    String::from_utf8(source.to_vec())
        .unwrap_or_else(|_| "failed to decode cfn_nag output".to_string())
        .trim()
        .to_string()
}
