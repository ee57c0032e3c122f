use crate::config::ToolPaths;
use crate::error::AppResult;
use crate::mkvtoolnix::{FlagMutator, ToolRunner, TrackInspector};
use crate::tracks::Selection;
use crate::utils::Reporter;
use std::path::Path;

/// Applies a selection to one file: chosen tracks on, every other audio and
/// subtitle track off, segment title removed.
pub struct FileModifier<'a> {
    inspector: TrackInspector<'a>,
    mutator: FlagMutator<'a>,
    reporter: &'a dyn Reporter,
}

impl<'a> FileModifier<'a> {
    pub fn new(
        runner: &'a dyn ToolRunner,
        tools: &'a ToolPaths,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            inspector: TrackInspector::new(runner, &tools.mkvmerge, reporter),
            mutator: FlagMutator::new(runner, &tools.mkvpropedit),
            reporter,
        }
    }

    pub fn inspector(&self) -> &TrackInspector<'a> {
        &self.inspector
    }

    /// Run the edits in order, stopping at the first failing tool call.
    ///
    /// Edits already issued stay on disk when a later one fails.
    pub fn modify_file(&self, path: &Path, selection: &Selection) -> AppResult {
        if let Some(uid) = &selection.subtitle_uid {
            self.mutator.set_default_forced(path, uid, true)?;
        }
        self.mutator
            .set_default_forced(path, &selection.audio_uid, true)?;

        // Clear from a fresh read taken after the enables landed, never from
        // the listing the selection was made on.
        let current = self.inspector.try_inspect(path)?;
        let mut cleared = 0;
        for track in current.iter().filter(|t| !selection.is_chosen(&t.uid)) {
            self.mutator.set_default_forced(path, &track.uid, false)?;
            cleared += 1;
        }

        self.mutator.delete_title(path)?;

        self.reporter.info(&format!(
            "Modification complete for {} ({} other track(s) cleared)",
            path.display(),
            cleared
        ));
        Ok(())
    }
}
