//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tapedeck_core::format_clock;

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Start output as soon as a loaded track is ready (default: true)
    pub autoplay: bool,

    /// Track loaded when the session is mounted (default: 0)
    pub start_index: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            start_index: 0,
        }
    }
}

/// What the player screen shows for the current track
///
/// Built from the session's last-observed state; position and duration may
/// lag behind the engine by one status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Index in the playlist
    pub index: usize,

    /// Track title
    pub title: String,

    /// Cover image URI
    pub artwork_uri: String,

    /// Play/pause button state
    pub is_playing: bool,

    /// Last status report said the resource is loaded
    pub is_loaded: bool,

    /// Last reported position
    pub position: Duration,

    /// Last reported duration
    pub duration: Option<Duration>,
}

impl NowPlaying {
    /// Upper bound of the progress slider in milliseconds
    ///
    /// Falls back to 1 so the slider always has a non-empty range.
    pub fn slider_max(&self) -> u64 {
        match (self.is_loaded, self.duration) {
            (true, Some(duration)) if !duration.is_zero() => duration.as_millis() as u64,
            _ => 1,
        }
    }

    /// Current slider value in milliseconds (0 until loaded)
    pub fn slider_value(&self) -> u64 {
        if self.is_loaded {
            self.position.as_millis() as u64
        } else {
            0
        }
    }

    /// Elapsed time label (`m:ss`)
    pub fn elapsed_label(&self) -> String {
        format_clock(self.position)
    }

    /// Total time label (`m:ss`, `0:00` while unknown)
    pub fn total_label(&self) -> String {
        format_clock(self.duration.unwrap_or_default())
    }
}
