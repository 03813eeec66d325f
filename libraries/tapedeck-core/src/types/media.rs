/// Playback engine data types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Opaque identifier of one audio resource loaded by a playback engine
///
/// Handles are minted by the engine and never reused for a different resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceHandle(u64);

impl ResourceHandle {
    /// Wrap a raw engine identifier
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw engine identifier
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of a resource's playback state as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Resource is decoded far enough to accept transport commands
    pub is_loaded: bool,

    /// Audio is currently being output
    pub is_playing: bool,

    /// Playback position from the start of the resource
    pub position: Duration,

    /// Total length, if the engine knows it yet
    pub duration: Option<Duration>,
}

impl EngineStatus {
    /// Status of a resource that is not (or no longer) loaded
    pub fn unloaded() -> Self {
        Self {
            is_loaded: false,
            is_playing: false,
            position: Duration::ZERO,
            duration: None,
        }
    }

    /// Status of a loaded resource
    pub fn loaded(is_playing: bool, position: Duration, duration: Option<Duration>) -> Self {
        Self {
            is_loaded: true,
            is_playing,
            position,
            duration,
        }
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::unloaded()
    }
}

/// A status snapshot tagged with the resource it describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Resource the snapshot belongs to
    pub handle: ResourceHandle,

    /// The snapshot itself
    pub status: EngineStatus,
}

/// Callback handed to the engine on `load`
///
/// The engine calls [`StatusSink::report`] at its own cadence, from any task.
/// Reports are queued for the owner of the receiving end, which decides
/// whether they still apply.
#[derive(Debug, Clone)]
pub struct StatusSink {
    tx: mpsc::UnboundedSender<StatusReport>,
}

impl StatusSink {
    /// Create a sink and the receiver its reports are delivered to
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StatusReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Deliver a status snapshot for `handle`
    ///
    /// Silently dropped if the receiver is gone.
    pub fn report(&self, handle: ResourceHandle, status: EngineStatus) {
        let _ = self.tx.send(StatusReport { handle, status });
    }

    /// Whether the receiving side has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
