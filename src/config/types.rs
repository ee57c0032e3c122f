use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations of the MKVToolNix binaries as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Inspection tool, called as `mkvmerge -J <file>`
    pub mkvmerge: PathBuf,
    /// Editing tool for track flags and the segment title
    pub mkvpropedit: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mkvmerge: default_tool_path("mkvmerge"),
            mkvpropedit: default_tool_path("mkvpropedit"),
        }
    }
}

#[cfg(windows)]
fn default_tool_path(name: &str) -> PathBuf {
    PathBuf::from(r"C:\Program Files\MKVToolNix").join(format!("{}.exe", name))
}

#[cfg(target_os = "macos")]
fn default_tool_path(name: &str) -> PathBuf {
    let brew = Path::new("/opt/homebrew/bin").join(name);
    if brew.exists() { brew } else { PathBuf::from(name) }
}

#[cfg(not(any(windows, target_os = "macos")))]
fn default_tool_path(name: &str) -> PathBuf {
    PathBuf::from(name)
}

/// Tool binaries checked to exist, handed to the inspector and the mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub mkvmerge: PathBuf,
    pub mkvpropedit: PathBuf,
}

impl ToolsConfig {
    /// Resolve both binaries once, failing with a config error if one is missing
    pub fn resolve(&self) -> AppResult<ToolPaths> {
        Ok(ToolPaths {
            mkvmerge: resolve_tool(&self.mkvmerge)?,
            mkvpropedit: resolve_tool(&self.mkvpropedit)?,
        })
    }
}

/// Bare names are searched on PATH, anything else must point at a file
fn resolve_tool(tool: &Path) -> AppResult<PathBuf> {
    let is_bare_name = tool.components().count() == 1 && !tool.is_absolute();
    let found = if is_bare_name {
        find_in_path(tool)
    } else {
        tool.is_file().then(|| tool.to_path_buf())
    };
    found.ok_or_else(|| {
        AppError::Config(format!(
            "{} not found. Please ensure MKVToolNix is installed and the path is correct",
            tool.display()
        ))
    })
}

fn find_in_path(tool: &Path) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = full.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Renamer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Characters refused in new file names
    pub invalid_chars: String,
    /// Width the episode number is zero-padded to
    pub pad_width: usize,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            invalid_chars: r#"<>:"/\|?*"#.to_string(),
            pad_width: 2,
        }
    }
}
