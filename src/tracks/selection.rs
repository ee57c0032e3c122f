use super::{InspectedTracks, Selection, TrackDescriptor, TrackUid};
use crate::error::{AppError, AppResult};
use crate::utils::Reporter;
use thiserror::Error;

/// One question of the selection protocol: numbered options, optionally with a zero option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsRequest {
    pub heading: String,
    pub prompt: String,
    /// Labels for options 1..=N
    pub options: Vec<String>,
    /// Label for option 0, when offered
    pub zero_option: Option<String>,
}

impl OptionsRequest {
    /// Smallest accepted answer
    pub fn min(&self) -> usize {
        if self.zero_option.is_some() { 0 } else { 1 }
    }

    /// Largest accepted answer
    pub fn max(&self) -> usize {
        self.options.len()
    }
}

/// Source of answers for the selection protocol (terminal, answer file, test script)
pub trait IndexSupplier {
    /// Show the options of a new question
    fn present(&mut self, request: &OptionsRequest);

    /// Next raw answer, `None` once no more input can arrive
    fn answer(&mut self, request: &OptionsRequest) -> AppResult<Option<String>>;

    /// Tell the user an answer was rejected before asking again
    fn reject(&mut self, input: &str, reason: &ChoiceError);
}

/// Why an answer was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    #[error("not a number")]
    NotANumber,

    #[error("must be between {min} and {max}")]
    OutOfRange { min: usize, max: usize },
}

/// Parse a raw answer into an option number within `[min, max]`
pub fn parse_choice(input: &str, min: usize, max: usize) -> Result<usize, ChoiceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChoiceError::NotANumber);
    }
    // All digits, so the only parse failure left is overflow
    let choice = trimmed
        .parse::<usize>()
        .map_err(|_| ChoiceError::OutOfRange { min, max })?;
    if choice < min || choice > max {
        return Err(ChoiceError::OutOfRange { min, max });
    }
    Ok(choice)
}

/// Ask until a valid option number arrives
fn ask(supplier: &mut dyn IndexSupplier, request: &OptionsRequest) -> AppResult<usize> {
    supplier.present(request);
    loop {
        let Some(input) = supplier.answer(request)? else {
            return Err(AppError::SelectionAborted);
        };
        match parse_choice(&input, request.min(), request.max()) {
            Ok(choice) => return Ok(choice),
            Err(reason) => supplier.reject(&input, &reason),
        }
    }
}

fn labels(tracks: &[TrackDescriptor]) -> Vec<String> {
    tracks.iter().map(|t| t.display_name()).collect()
}

/// Choose one subtitle track (or none) and exactly one audio track.
///
/// Option numbers are bound to list positions, so the lists must not be
/// reordered between presenting and resolving.
pub fn select_tracks(
    tracks: &InspectedTracks,
    supplier: &mut dyn IndexSupplier,
    reporter: &dyn Reporter,
) -> AppResult<Selection> {
    if tracks.audios.is_empty() {
        return Err(AppError::NoAudioTracks);
    }

    let subtitle_uid: Option<TrackUid> = if tracks.subtitles.is_empty() {
        reporter.info("No subtitle tracks, subtitles stay disabled");
        None
    } else {
        let request = OptionsRequest {
            heading: "Subtitle Tracks:".to_string(),
            prompt: "Select subtitle track (number)".to_string(),
            options: labels(&tracks.subtitles),
            zero_option: Some("Disable subtitles".to_string()),
        };
        match ask(supplier, &request)? {
            0 => None,
            n => Some(tracks.subtitles[n - 1].uid.clone()),
        }
    };

    let request = OptionsRequest {
        heading: "Audio Tracks:".to_string(),
        prompt: "Select audio track (number)".to_string(),
        options: labels(&tracks.audios),
        zero_option: None,
    };
    let choice = ask(supplier, &request)?;
    let audio_uid = tracks.audios[choice - 1].uid.clone();

    match &subtitle_uid {
        Some(uid) => reporter.info(&format!("Selected audio {} and subtitle {}", audio_uid, uid)),
        None => reporter.info(&format!("Selected audio {} without subtitles", audio_uid)),
    }

    Ok(Selection {
        audio_uid,
        subtitle_uid,
    })
}
