use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// External tool could not run, exited non-zero or printed unusable output
    #[error("{tool} failed: {message}")]
    ToolInvocation { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to parse config")]
    TomlDe(#[from] toml::de::Error),

    #[error("Unable to serialize config")]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("No audio track to select")]
    NoAudioTracks,

    #[error("Track selection aborted: no more input")]
    SelectionAborted,

    #[error("Rename aborted: {0}")]
    Rename(String),

    #[error("Episode scrape failed: {0}")]
    Scrape(String),
}

impl AppError {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ToolInvocation {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
