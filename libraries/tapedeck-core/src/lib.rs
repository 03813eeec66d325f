//! Tapedeck Core
//!
//! Platform-agnostic core types, capability traits, and error handling for Tapedeck.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `ResourceHandle`, `EngineStatus`
//! - **Capability Traits**: `MediaPlaybackEngine`, `PermissionGate`, `ImagePicker`
//! - **Error Handling**: `CoreError` and `EngineError`
//!
//! Audio decoding, permission prompts and the camera/photo-library UI live
//! outside this workspace. The traits here are the seams the platform fills in.
//!
//! # Example
//!
//! ```rust
//! use tapedeck_core::{format_clock, Playlist};
//! use std::time::Duration;
//!
//! let playlist = Playlist::demo();
//! assert_eq!(playlist.len(), 3);
//! assert_eq!(format_clock(Duration::from_secs(200)), "3:20");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, EngineError, Result};
pub use time::format_clock;
pub use traits::{ImagePicker, MediaPlaybackEngine, PermissionGate};
pub use types::{
    // Playback
    EngineStatus, ResourceHandle, StatusReport, StatusSink,
    // Playlist
    Playlist, Track,
    // Capture
    PermissionStatus, PickedAsset, PickerOptions, PickerResult,
};
