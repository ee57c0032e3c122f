use crate::error::{AppError, AppResult};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Process boundary to the MKVToolNix binaries
pub trait ToolRunner {
    /// Run `program` with `args` to completion and return its stdout.
    ///
    /// Fails when the process cannot start or exits non-zero.
    fn run(&self, program: &Path, args: &[OsString]) -> AppResult<String>;
}

/// Runs the real binaries, blocking until each one exits
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> AppResult<String> {
        let tool = tool_name(program);
        debug!("Running {} {:?}", program.display(), args);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| AppError::tool(&tool, format!("failed to execute: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // mkvmerge and mkvpropedit print their errors on stdout
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            return Err(AppError::tool(
                &tool,
                format!("exited with {}: {}", output.status, detail),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Short name used in error messages
pub fn tool_name(program: &Path) -> String {
    program
        .file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.display().to_string())
}
