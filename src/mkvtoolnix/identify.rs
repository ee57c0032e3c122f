use super::runner::{ToolRunner, tool_name};
use crate::error::{AppError, AppResult};
use crate::tracks::{InspectedTracks, TrackDescriptor, TrackKind, TrackUid};
use crate::utils::Reporter;
use serde::Deserialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

/// Reads the track list of a file through `mkvmerge -J`
pub struct TrackInspector<'a> {
    runner: &'a dyn ToolRunner,
    mkvmerge: &'a Path,
    reporter: &'a dyn Reporter,
}

impl<'a> TrackInspector<'a> {
    pub fn new(
        runner: &'a dyn ToolRunner,
        mkvmerge: &'a Path,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            runner,
            mkvmerge,
            reporter,
        }
    }

    /// Inspect a file, propagating tool and parse failures
    pub fn try_inspect(&self, path: &Path) -> AppResult<InspectedTracks> {
        let output = self.runner.run(self.mkvmerge, &identify_args(path))?;
        parse_identify(&output).map_err(|e| match e {
            AppError::ToolInvocation { message, .. } => {
                AppError::tool(tool_name(self.mkvmerge), message)
            }
            other => other,
        })
    }

    /// Inspect a file; a failure is reported and yields two empty lists
    pub fn inspect(&self, path: &Path) -> InspectedTracks {
        match self.try_inspect(path) {
            Ok(tracks) => tracks,
            Err(e) => {
                self.reporter
                    .error(&format!("Error reading MKV file {}: {}", path.display(), e));
                InspectedTracks::default()
            }
        }
    }
}

pub fn identify_args(path: &Path) -> Vec<OsString> {
    vec!["-J".into(), path.as_os_str().to_owned()]
}

/// Parse the JSON printed by `mkvmerge -J`, keeping audio and subtitle tracks in order
pub fn parse_identify(json: &str) -> AppResult<InspectedTracks> {
    let output: IdentifyOutput = serde_json::from_str(json)
        .map_err(|e| AppError::tool("mkvmerge", format!("unparsable JSON output: {}", e)))?;

    let mut tracks = InspectedTracks::default();
    let mut seen = HashSet::new();

    for (position, track) in output.tracks.into_iter().enumerate() {
        let kind = TrackKind::from_mkvmerge(&track.type_);
        if kind == TrackKind::Other {
            continue;
        }

        let properties = track.properties;
        let uid = properties.uid.map(RawUid::into_uid).ok_or_else(|| {
            AppError::tool("mkvmerge", format!("{} track {} has no uid", track.type_, position))
        })?;
        if !seen.insert(uid.clone()) {
            return Err(AppError::tool(
                "mkvmerge",
                format!("duplicate track uid {}", uid),
            ));
        }

        tracks.push(match kind {
            TrackKind::Subtitle => {
                TrackDescriptor::subtitle(uid, properties.language, properties.track_name)
            }
            _ => TrackDescriptor::audio(uid, properties.language),
        });
    }

    Ok(tracks)
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct IdentifyOutput {
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    uid: Option<RawUid>,
    language: Option<String>,
    track_name: Option<String>,
}

/// mkvmerge prints uids as numbers, older versions and hand-made files may use strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawUid {
    Number(u64),
    Text(String),
}

impl RawUid {
    fn into_uid(self) -> TrackUid {
        match self {
            RawUid::Number(n) => TrackUid::new(n.to_string()),
            RawUid::Text(s) => TrackUid::new(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CaptureReporter, FakeMkvToolnix, FakeTrack};

    const IDENTIFY: &str = r#"{
        "container": { "properties": { "title": "Episode 1" }, "recognized": true },
        "tracks": [
            { "id": 0, "type": "video", "properties": { "uid": 100, "language": "und" } },
            { "id": 1, "type": "audio", "properties": { "uid": 10, "language": "eng" } },
            { "id": 2, "type": "audio", "properties": { "uid": 18446744073709551615 } },
            { "id": 3, "type": "subtitles",
              "properties": { "uid": 1, "language": "eng", "track_name": "Signs" } },
            { "id": 4, "type": "subtitles", "properties": { "uid": "2" } }
        ]
    }"#;

    #[test]
    fn test_parse_identify_splits_and_keeps_order() {
        let tracks = parse_identify(IDENTIFY).unwrap();
        assert_eq!(
            tracks.audios,
            vec![
                TrackDescriptor::audio("10", Some("eng".into())),
                TrackDescriptor::audio("18446744073709551615", None),
            ]
        );
        assert_eq!(
            tracks.subtitles,
            vec![
                TrackDescriptor::subtitle("1", Some("eng".into()), Some("Signs".into())),
                TrackDescriptor::subtitle("2", Some("unknown".into()), Some("No name".into())),
            ]
        );
    }

    #[test]
    fn test_parse_identify_without_tracks() {
        let tracks = parse_identify(r#"{"container": {}}"#).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_parse_identify_rejects_bad_output() {
        assert!(matches!(
            parse_identify("Error: not a file"),
            Err(AppError::ToolInvocation { .. })
        ));

        let missing_uid = r#"{"tracks": [{"type": "audio", "properties": {}}]}"#;
        assert!(parse_identify(missing_uid).is_err());

        let duplicate = r#"{"tracks": [
            {"type": "audio", "properties": {"uid": 5}},
            {"type": "subtitles", "properties": {"uid": 5}}
        ]}"#;
        assert!(parse_identify(duplicate).is_err());
    }

    #[test]
    fn test_inspect_calls_mkvmerge_json() {
        let fake = FakeMkvToolnix::new();
        fake.add_file(
            "a.mkv",
            vec![FakeTrack::audio(10, "eng"), FakeTrack::subtitle(1, "eng", "Full")],
        );
        let reporter = CaptureReporter::default();
        let inspector = TrackInspector::new(&fake, fake.mkvmerge(), &reporter);

        let tracks = inspector.inspect(Path::new("a.mkv"));
        assert_eq!(tracks.audios.len(), 1);
        assert_eq!(tracks.subtitles[0].name.as_deref(), Some("Full"));
        assert_eq!(fake.calls(), vec!["mkvmerge -J a.mkv"]);
    }

    #[test]
    fn test_inspect_failure_yields_empty_lists() {
        let fake = FakeMkvToolnix::new();
        let reporter = CaptureReporter::default();
        let inspector = TrackInspector::new(&fake, fake.mkvmerge(), &reporter);

        let tracks = inspector.inspect(Path::new("missing.mkv"));
        assert!(tracks.is_empty());
        assert_eq!(reporter.errors().len(), 1);
        assert!(reporter.errors()[0].contains("missing.mkv"));
        assert!(inspector.try_inspect(Path::new("missing.mkv")).is_err());
    }
}
