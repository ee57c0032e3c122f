use super::runner::ToolRunner;
use crate::error::AppResult;
use crate::tracks::TrackUid;
use std::ffi::OsString;
use std::path::Path;

/// Issues in-place header edits through mkvpropedit.
///
/// Every call is one process run; there is no rollback across calls.
pub struct FlagMutator<'a> {
    runner: &'a dyn ToolRunner,
    mkvpropedit: &'a Path,
}

impl<'a> FlagMutator<'a> {
    pub fn new(runner: &'a dyn ToolRunner, mkvpropedit: &'a Path) -> Self {
        Self {
            runner,
            mkvpropedit,
        }
    }

    /// Set both the "default track" and "forced display" flags of a track
    pub fn set_default_forced(&self, path: &Path, uid: &TrackUid, enabled: bool) -> AppResult {
        self.runner
            .run(self.mkvpropedit, &flag_args(path, uid, enabled))?;
        Ok(())
    }

    /// Remove the title element from the segment info
    pub fn delete_title(&self, path: &Path) -> AppResult {
        self.runner.run(self.mkvpropedit, &delete_title_args(path))?;
        Ok(())
    }
}

pub fn flag_args(path: &Path, uid: &TrackUid, enabled: bool) -> Vec<OsString> {
    let value = enabled as u8;
    vec![
        path.as_os_str().to_owned(),
        "--edit".into(),
        format!("track:={}", uid).into(),
        "--set".into(),
        format!("flag-default={}", value).into(),
        "--set".into(),
        format!("flag-forced={}", value).into(),
    ]
}

pub fn delete_title_args(path: &Path) -> Vec<OsString> {
    vec![
        path.as_os_str().to_owned(),
        "--edit".into(),
        "info".into(),
        "--delete".into(),
        "title".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::{FakeMkvToolnix, FakeTrack};

    #[test]
    fn test_flag_args() {
        let args = flag_args(Path::new("show/ep 1.mkv"), &"11".into(), true);
        let expected: Vec<OsString> = [
            "show/ep 1.mkv",
            "--edit",
            "track:=11",
            "--set",
            "flag-default=1",
            "--set",
            "flag-forced=1",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);

        let args = flag_args(Path::new("a.mkv"), &"3".into(), false);
        assert_eq!(args[4], OsString::from("flag-default=0"));
        assert_eq!(args[6], OsString::from("flag-forced=0"));
    }

    #[test]
    fn test_delete_title_args() {
        let args = delete_title_args(Path::new("a.mkv"));
        assert_eq!(
            args,
            ["a.mkv", "--edit", "info", "--delete", "title"]
                .iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_mutations_reach_the_file() {
        let fake = FakeMkvToolnix::new();
        fake.add_file("a.mkv", vec![FakeTrack::audio(10, "eng")]);
        let mutator = FlagMutator::new(&fake, fake.mkvpropedit());

        mutator
            .set_default_forced(Path::new("a.mkv"), &"10".into(), true)
            .unwrap();
        mutator.delete_title(Path::new("a.mkv")).unwrap();

        let file = fake.file("a.mkv");
        assert!(file.tracks[0].default && file.tracks[0].forced);
        assert_eq!(file.title, None);
    }

    #[test]
    fn test_unknown_track_fails() {
        let fake = FakeMkvToolnix::new();
        fake.add_file("a.mkv", vec![FakeTrack::audio(10, "eng")]);
        let mutator = FlagMutator::new(&fake, fake.mkvpropedit());

        let result = mutator.set_default_forced(Path::new("a.mkv"), &"99".into(), true);
        assert!(matches!(result, Err(AppError::ToolInvocation { .. })));
    }
}
