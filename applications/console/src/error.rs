/// Console error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    InvalidCommand(String),

    #[error(transparent)]
    Playback(#[from] tapedeck_playback::PlaybackError),

    #[error(transparent)]
    Capture(#[from] tapedeck_capture::CaptureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
