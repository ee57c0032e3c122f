use super::job::{BatchSummary, FileOutcome};
use super::modify::FileModifier;
use crate::error::AppError;
use crate::tracks::{IndexSupplier, select_tracks};
use crate::utils::Reporter;
use std::path::Path;
use walkdir::WalkDir;

/// Walks a directory tree and runs inspection, selection and modification per `.mkv` file
pub struct DirectoryWalker<'a> {
    modifier: FileModifier<'a>,
    reporter: &'a dyn Reporter,
}

/// Literal, case-sensitive suffix a file name must end with
pub const MKV_SUFFIX: &str = ".mkv";

pub fn is_mkv_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(MKV_SUFFIX))
        .unwrap_or(false)
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(modifier: FileModifier<'a>, reporter: &'a dyn Reporter) -> Self {
        Self { modifier, reporter }
    }

    /// Visit every `.mkv` file below `root` in file name order.
    ///
    /// One file failing never stops the walk.
    pub fn process_directory(
        &self,
        root: &Path,
        supplier: &mut dyn IndexSupplier,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        // Linked episodes are edited through the link
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    self.reporter
                        .error(&format!("Cannot read directory entry: {}", e));
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_mkv_file(entry.path()) {
                continue;
            }

            let path = entry.path();
            let outcome = self.process_file(path, supplier);
            summary.push(path.to_path_buf(), outcome);
        }

        summary
    }

    /// Inspect, select and modify one file
    pub fn process_file(&self, path: &Path, supplier: &mut dyn IndexSupplier) -> FileOutcome {
        self.reporter
            .info(&format!("Processing file: {}", path.display()));

        let tracks = self.modifier.inspector().inspect(path);
        if tracks.is_empty() {
            let reason = "No subtitle or audio tracks found. Skipping file.".to_string();
            self.reporter.warn(&reason);
            return FileOutcome::Skipped { reason };
        }

        let selection = match select_tracks(&tracks, supplier, self.reporter) {
            Ok(selection) => selection,
            Err(AppError::NoAudioTracks) => {
                let reason = "No audio track found. Skipping file.".to_string();
                self.reporter.warn(&reason);
                return FileOutcome::Skipped { reason };
            }
            Err(e) => {
                self.reporter
                    .error(&format!("No selection for {}: {}", path.display(), e));
                return FileOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        match self.modifier.modify_file(path, &selection) {
            Ok(()) => FileOutcome::Modified { selection },
            Err(e) => {
                self.reporter
                    .error(&format!("Failed to modify {}: {}", path.display(), e));
                FileOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
