//! Error types for playback management

use tapedeck_core::EngineError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index outside the playlist
    #[error("Index out of bounds: {index} (playlist has {len} tracks)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The engine could not load a track
    #[error("Failed to load {uri}: {source}")]
    Load {
        uri: String,
        #[source]
        source: EngineError,
    },

    /// Seek fraction is NaN or infinite
    #[error("Invalid seek fraction: {0}")]
    InvalidSeekFraction(f32),

    /// Engine failure other than a stale-resource race
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
