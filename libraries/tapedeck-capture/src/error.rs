//! Error types for the capture flow

use tapedeck_core::CoreError;
use thiserror::Error;

/// Capture errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Camera or photo library access was refused
    #[error("Permission denied: camera and photo library access are both required")]
    PermissionDenied,

    /// The picker itself failed
    #[error(transparent)]
    Picker(#[from] CoreError),
}

/// Result type for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;
