use crate::config::ToolPaths;
use std::path::Path;
use std::process::Command;

/// Availability of the MKVToolNix binaries
#[derive(Debug, Clone)]
pub struct DependencyStatus {
    pub mkvmerge: Option<String>,
    pub mkvpropedit: Option<String>,
}

impl DependencyStatus {
    /// Run `--version` on both tools, keeping the first line of each answer
    pub fn check(tools: &ToolPaths) -> Self {
        Self {
            mkvmerge: tool_version(&tools.mkvmerge),
            mkvpropedit: tool_version(&tools.mkvpropedit),
        }
    }

    pub fn all_available(&self) -> bool {
        self.mkvmerge.is_some() && self.mkvpropedit.is_some()
    }
}

/// Version line of a tool, `None` when it does not run
fn tool_version(cmd: &Path) -> Option<String> {
    Command::new(cmd)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
}
