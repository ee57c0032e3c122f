//! In-memory stand-ins for the MKVToolNix binaries and the reporter.

use crate::error::{AppError, AppResult};
use crate::mkvtoolnix::ToolRunner;
use crate::utils::Reporter;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTrack {
    pub uid: u64,
    pub kind: &'static str,
    pub language: Option<String>,
    pub name: Option<String>,
    pub default: bool,
    pub forced: bool,
}

impl FakeTrack {
    pub fn audio(uid: u64, language: &str) -> Self {
        Self {
            uid,
            kind: "audio",
            language: Some(language.to_string()),
            name: None,
            default: false,
            forced: false,
        }
    }

    pub fn subtitle(uid: u64, language: &str, name: &str) -> Self {
        Self {
            uid,
            kind: "subtitles",
            language: Some(language.to_string()),
            name: Some(name.to_string()),
            default: false,
            forced: false,
        }
    }

    pub fn video(uid: u64) -> Self {
        Self {
            uid,
            kind: "video",
            language: None,
            name: None,
            default: true,
            forced: false,
        }
    }

    pub fn flagged(mut self) -> Self {
        self.default = true;
        self.forced = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeFile {
    pub tracks: Vec<FakeTrack>,
    pub title: Option<String>,
}

impl FakeFile {
    /// Uids of audio/subtitle tracks carrying either flag
    pub fn flagged_uids(&self) -> Vec<u64> {
        self.tracks
            .iter()
            .filter(|t| t.kind != "video" && (t.default || t.forced))
            .map(|t| t.uid)
            .collect()
    }

    /// Uids of tracks carrying both flags
    pub fn default_forced_uids(&self) -> Vec<u64> {
        self.tracks
            .iter()
            .filter(|t| t.kind != "video" && t.default && t.forced)
            .map(|t| t.uid)
            .collect()
    }
}

/// Interprets `mkvmerge -J` and `mkvpropedit` invocations against in-memory files
pub struct FakeMkvToolnix {
    mkvmerge: PathBuf,
    mkvpropedit: PathBuf,
    files: RefCell<HashMap<PathBuf, FakeFile>>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
}

impl FakeMkvToolnix {
    pub fn new() -> Self {
        Self {
            mkvmerge: PathBuf::from("mkvmerge"),
            mkvpropedit: PathBuf::from("mkvpropedit"),
            files: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
        }
    }

    pub fn mkvmerge(&self) -> &Path {
        &self.mkvmerge
    }

    pub fn mkvpropedit(&self) -> &Path {
        &self.mkvpropedit
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, tracks: Vec<FakeTrack>) {
        self.files.borrow_mut().insert(
            path.into(),
            FakeFile {
                tracks,
                title: Some("Release title".to_string()),
            },
        );
    }

    pub fn file(&self, path: impl AsRef<Path>) -> FakeFile {
        self.files.borrow()[path.as_ref()].clone()
    }

    /// Every call whose command line contains `pattern` exits non-zero
    pub fn fail_when(&self, pattern: &str) {
        self.failures.borrow_mut().push(pattern.to_string());
    }

    /// Command lines seen so far, `<tool> <args...>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn identify(&self, args: &[String]) -> AppResult<String> {
        let [flag, path] = args else {
            return Err(AppError::tool("mkvmerge", "unexpected arguments"));
        };
        if flag != "-J" {
            return Err(AppError::tool("mkvmerge", "expected -J"));
        }
        let files = self.files.borrow();
        let file = files
            .get(Path::new(path))
            .ok_or_else(|| AppError::tool("mkvmerge", format!("{} not found", path)))?;

        let tracks: Vec<_> = file
            .tracks
            .iter()
            .enumerate()
            .map(|(id, t)| {
                let mut properties = json!({
                    "uid": t.uid,
                    "default_track": t.default,
                    "forced_track": t.forced,
                });
                if let Some(language) = &t.language {
                    properties["language"] = json!(language);
                }
                if let Some(name) = &t.name {
                    properties["track_name"] = json!(name);
                }
                json!({ "id": id, "type": t.kind, "properties": properties })
            })
            .collect();

        Ok(json!({
            "container": { "properties": { "title": file.title }, "recognized": true },
            "tracks": tracks,
        })
        .to_string())
    }

    fn propedit(&self, args: &[String]) -> AppResult<String> {
        let fail = |message: String| Err(AppError::tool("mkvpropedit", message));
        let Some((path, edits)) = args.split_first() else {
            return fail("no file given".to_string());
        };
        let mut files = self.files.borrow_mut();
        let Some(file) = files.get_mut(Path::new(path)) else {
            return fail(format!("{} not found", path));
        };

        let mut target: Option<&str> = None;
        let mut iter = edits.iter();
        while let Some(option) = iter.next() {
            let Some(value) = iter.next() else {
                return fail(format!("{} without value", option));
            };
            match option.as_str() {
                "--edit" => target = Some(value.as_str()),
                "--delete" if target == Some("info") && value == "title" => file.title = None,
                "--set" => {
                    let Some(uid) = target.and_then(|t| t.strip_prefix("track:=")) else {
                        return fail("--set outside a track edit".to_string());
                    };
                    let Some(track) = file.tracks.iter_mut().find(|t| t.uid.to_string() == uid)
                    else {
                        return fail(format!("no track with uid {}", uid));
                    };
                    match value.split_once('=') {
                        Some(("flag-default", v)) => track.default = v == "1",
                        Some(("flag-forced", v)) => track.forced = v == "1",
                        _ => return fail(format!("unsupported property {}", value)),
                    }
                }
                _ => return fail(format!("unsupported option {} {}", option, value)),
            }
        }
        Ok(String::new())
    }
}

impl ToolRunner for FakeMkvToolnix {
    fn run(&self, program: &Path, args: &[OsString]) -> AppResult<String> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        let tool = if program == self.mkvmerge {
            "mkvmerge"
        } else if program == self.mkvpropedit {
            "mkvpropedit"
        } else {
            return Err(AppError::tool(program.display().to_string(), "unknown program"));
        };

        let line = format!("{} {}", tool, args.join(" "));
        self.calls.borrow_mut().push(line.clone());
        if self.failures.borrow().iter().any(|p| line.contains(p.as_str())) {
            return Err(AppError::tool(tool, "injected failure"));
        }

        if tool == "mkvmerge" {
            self.identify(&args)
        } else {
            self.propedit(&args)
        }
    }
}

/// Reporter keeping every message for assertions
#[derive(Debug, Default)]
pub struct CaptureReporter {
    infos: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl CaptureReporter {
    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Reporter for CaptureReporter {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
