use crate::tracks::Selection;
use crate::utils::Reporter;
use std::fmt;
use std::path::PathBuf;

/// What happened to one file of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// All flag edits and the title removal went through
    Modified { selection: Selection },
    /// Nothing to select, file left untouched
    Skipped { reason: String },
    /// A tool call failed; earlier edits of this file may already be applied
    Failed { message: String },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Modified { selection } => match &selection.subtitle_uid {
                Some(sub) => write!(f, "audio {}, subtitle {}", selection.audio_uid, sub),
                None => write!(f, "audio {}, subtitles off", selection.audio_uid),
            },
            FileOutcome::Skipped { reason } => write!(f, "skipped: {}", reason),
            FileOutcome::Failed { message } => write!(f, "failed: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Get the filename
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Per-file outcomes of one directory walk, in visiting order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn push(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.reports.push(FileReport { path, outcome });
    }

    pub fn modified(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Modified { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// Log one line per file and a closing count
    pub fn report(&self, reporter: &dyn Reporter) {
        for report in &self.reports {
            let line = format!("{}: {}", report.filename(), report.outcome);
            match report.outcome {
                FileOutcome::Failed { .. } => reporter.error(&line),
                _ => reporter.info(&line),
            }
        }
        let line = format!(
            "Processed {} file(s): {} modified, {} skipped, {} failed",
            self.reports.len(),
            self.modified(),
            self.skipped(),
            self.failed()
        );
        if self.failed() > 0 {
            reporter.warn(&line);
        } else {
            reporter.info(&line);
        }
    }
}
