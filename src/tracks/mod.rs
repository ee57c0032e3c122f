pub mod prompt;
pub mod selection;

pub use prompt::{ScriptedSupplier, TerminalSupplier};
pub use selection::{IndexSupplier, select_tracks};

use std::fmt;

/// Stable track identifier as reported by mkvmerge, used to address the track in mkvpropedit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackUid(String);

impl TrackUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }
}

impl fmt::Display for TrackUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackUid {
    fn from(uid: &str) -> Self {
        Self::new(uid)
    }
}

/// Track classification, only audio and subtitles take part in selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Subtitle,
    Other,
}

impl TrackKind {
    /// Map the `type` field of `mkvmerge -J`
    pub fn from_mkvmerge(type_: &str) -> Self {
        match type_ {
            "audio" => TrackKind::Audio,
            "subtitles" => TrackKind::Subtitle,
            _ => TrackKind::Other,
        }
    }
}

/// One track of a Matroska file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub uid: TrackUid,
    pub kind: TrackKind,
    pub language: String,
    /// Only populated for subtitles
    pub name: Option<String>,
}

impl TrackDescriptor {
    pub const UNKNOWN_LANGUAGE: &'static str = "unknown";
    pub const NO_NAME: &'static str = "No name";

    pub fn audio(uid: impl Into<TrackUid>, language: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            kind: TrackKind::Audio,
            language: language.unwrap_or_else(|| Self::UNKNOWN_LANGUAGE.to_string()),
            name: None,
        }
    }

    pub fn subtitle(
        uid: impl Into<TrackUid>,
        language: Option<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            kind: TrackKind::Subtitle,
            language: language.unwrap_or_else(|| Self::UNKNOWN_LANGUAGE.to_string()),
            name: Some(name.unwrap_or_else(|| Self::NO_NAME.to_string())),
        }
    }

    /// Label shown next to the option number
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!(
                "Track ID: {}, Language: {}, Name: {}",
                self.uid, self.language, name
            ),
            None => format!("Track ID: {}, Language: {}", self.uid, self.language),
        }
    }
}

/// Tracks of one file split by kind, in the order mkvmerge reported them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectedTracks {
    pub subtitles: Vec<TrackDescriptor>,
    pub audios: Vec<TrackDescriptor>,
}

impl InspectedTracks {
    /// Append a track to the list of its kind, other kinds are dropped
    pub fn push(&mut self, track: TrackDescriptor) {
        match track.kind {
            TrackKind::Audio => self.audios.push(track),
            TrackKind::Subtitle => self.subtitles.push(track),
            TrackKind::Other => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.is_empty() && self.audios.is_empty()
    }

    /// Every selectable track, subtitles first
    pub fn iter(&self) -> impl Iterator<Item = &TrackDescriptor> {
        self.subtitles.iter().chain(self.audios.iter())
    }
}

/// Outcome of the selection protocol for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub audio_uid: TrackUid,
    /// `None` disables every subtitle track
    pub subtitle_uid: Option<TrackUid>,
}

impl Selection {
    pub fn is_chosen(&self, uid: &TrackUid) -> bool {
        self.audio_uid == *uid || self.subtitle_uid.as_ref() == Some(uid)
    }
}
