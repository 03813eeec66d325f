//! Tapedeck - Playback Session
//!
//! Platform-agnostic playback management for the Tapedeck player screen.
//!
//! This crate provides:
//! - Track loading with strict single-resource ownership
//! - Play/pause toggle driven by the engine's own status
//! - Seeking (by time and by slider fraction), gated on a loaded resource
//! - Bounded next/previous navigation (no wraparound)
//! - Status report handling that discards reports for superseded resources
//! - UI events and a now-playing snapshot
//!
//! # Architecture
//!
//! `tapedeck-playback` never decodes audio itself. The platform supplies a
//! [`MediaPlaybackEngine`](tapedeck_core::MediaPlaybackEngine) and the
//! session drives it. The engine pushes status snapshots through a channel;
//! the session applies them when the front end drains them, so a report
//! always lands on a consistent session.
//!
//! Races between user taps and slow engine calls resolve to no-ops rather
//! than errors: toggling or seeking before anything is loaded, or against a
//! resource the engine already considers stale, silently does nothing.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tapedeck_core::{MediaPlaybackEngine, Playlist};
//! use tapedeck_playback::{PlaybackConfig, PlaybackSession};
//!
//! async fn run(engine: Arc<dyn MediaPlaybackEngine>) -> tapedeck_playback::Result<()> {
//!     let mut session = PlaybackSession::new(engine, Playlist::demo(), PlaybackConfig::default());
//!
//!     // Screen mounted: load and autoplay the first track
//!     session.mount().await?;
//!
//!     // Apply whatever the engine has reported so far
//!     session.pump_status();
//!
//!     session.seek(Duration::from_secs(30)).await?;
//!     session.toggle_play_pause().await?;
//!     session.next().await?;
//!
//!     for event in session.drain_events() {
//!         println!("{:?}", event);
//!     }
//!
//!     // Screen unmounted
//!     session.close().await;
//!     Ok(())
//! }
//! ```

mod error;
mod events;
mod session;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use session::PlaybackSession;
pub use types::{NowPlaying, PlaybackConfig};
