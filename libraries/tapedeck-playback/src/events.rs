//! Session Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! session and drained by the front end after each operation:
//! - Track changes (immediately on load request)
//! - Play/pause state changes
//! - Position updates (one per applied status report)
//! - Load failures

use serde::{Deserialize, Serialize};

/// Events emitted by a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Current track changed (emitted before the engine load completes)
    TrackChanged {
        /// New playlist index
        index: usize,
        /// Title of the new track
        title: String,
    },

    /// Play/pause state changed
    StateChanged {
        /// Whether audio is playing now
        playing: bool,
    },

    /// Position update from the engine
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total duration, if known
        duration_ms: Option<u64>,
    },

    /// An operation failed
    Error {
        /// Error message
        message: String,
    },
}
