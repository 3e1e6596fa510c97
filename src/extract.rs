// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

/// Extract plain text from PDF bytes via `pdftotext -layout`, which keeps
/// column alignment and non-Latin scripts intact. `password` unlocks
/// protected documents.
///
/// The PDF is staged in a `NamedTempFile` that is removed on every exit path
/// (drop). Tool failures surface pdftotext's stderr verbatim when available.
pub fn extract_text(pdf_bytes: &[u8], password: Option<&str>) -> Result<String, PipelineError> {
    let mut tmp = NamedTempFile::with_suffix(".pdf")
        .map_err(|e| PipelineError::Extract(format!("failed to create scratch file: {e}")))?;
    tmp.write_all(pdf_bytes)
        .and_then(|()| tmp.flush())
        .map_err(|e| PipelineError::Extract(format!("failed to stage PDF: {e}")))?;

    let mut cmd = Command::new("pdftotext");
    cmd.arg("-layout");
    if let Some(pw) = password.filter(|p| !p.is_empty()) {
        cmd.args(["-upw", pw]);
    }
    cmd.arg(tmp.path()).arg("-");

    let output = cmd.output().map_err(|e| {
        PipelineError::Extract(format!("failed to run pdftotext: {e} (is poppler installed?)"))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            return Err(PipelineError::Extract(format!(
                "pdftotext exited with {}",
                output.status
            )));
        }
        return Err(PipelineError::Extract(stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Used by `doctor` to report whether the extraction tool is available.
pub fn tool_available() -> bool {
    Command::new("pdftotext")
        .arg("-v")
        .output()
        .is_ok()
}
