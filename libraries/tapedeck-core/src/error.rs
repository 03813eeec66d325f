/// Core error types for Tapedeck
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tapedeck
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A playlist must contain at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Image picker failed (camera unavailable, library unreadable, ...)
    #[error("Picker error: {0}")]
    Picker(String),
}

impl CoreError {
    /// Create a picker error
    pub fn picker(msg: impl Into<String>) -> Self {
        Self::Picker(msg.into())
    }
}

/// Errors reported by a `MediaPlaybackEngine`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The resource could not be loaded (network, codec or permission failure)
    #[error("Load error: {0}")]
    Load(String),

    /// Operation on a stale, unloaded or not-yet-loaded resource
    #[error("State error: {0}")]
    State(String),

    /// Any other engine failure
    #[error("Engine backend error: {0}")]
    Backend(String),
}

impl EngineError {
    /// Create a load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Whether this is a contract violation on a stale/unloaded resource
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }
}
