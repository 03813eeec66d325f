//! Capture screen session
//!
//! Asks for permissions, launches the platform picker, and remembers the
//! image the user ended up with.

use crate::error::{CaptureError, Result};
use std::fmt;
use std::sync::Arc;
use tapedeck_core::{ImagePicker, PermissionGate, PickerOptions, PickerResult};
use tracing::{debug, info, warn};

/// Where a captured image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    /// Take a new photo
    Camera,
    /// Pick an existing image
    Library,
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Library => write!(f, "library"),
        }
    }
}

/// Image capture/selection session
pub struct CaptureSession {
    gate: Arc<dyn PermissionGate>,
    picker: Arc<dyn ImagePicker>,
    options: PickerOptions,
    selected_image: Option<String>,
}

impl CaptureSession {
    /// Create a session with default picker options (editing on, best quality)
    pub fn new(gate: Arc<dyn PermissionGate>, picker: Arc<dyn ImagePicker>) -> Self {
        Self {
            gate,
            picker,
            options: PickerOptions::default(),
            selected_image: None,
        }
    }

    /// Override the options passed to the picker
    #[must_use]
    pub fn with_options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    /// Take a photo with the camera
    pub async fn take_photo(&mut self) -> Result<Option<String>> {
        self.capture(CaptureSource::Camera).await
    }

    /// Pick an image from the photo library
    pub async fn pick_image(&mut self) -> Result<Option<String>> {
        self.capture(CaptureSource::Library).await
    }

    /// Run the full flow for `source`
    ///
    /// Returns the newly selected URI, or `None` if the user canceled (the
    /// previous selection is kept). The picker is never launched unless both
    /// camera and library access are granted.
    pub async fn capture(&mut self, source: CaptureSource) -> Result<Option<String>> {
        let permission = self.gate.request_capture().await;
        if !permission.is_granted() {
            warn!("Capture from {} aborted: permission denied", source);
            return Err(CaptureError::PermissionDenied);
        }

        let result = match source {
            CaptureSource::Camera => self.picker.launch_camera(self.options).await?,
            CaptureSource::Library => self.picker.launch_library(self.options).await?,
        };

        match result {
            PickerResult::Picked(assets) if !assets.is_empty() => {
                let uri = assets[0].uri.clone();
                info!("Selected image from {}: {}", source, uri);
                self.selected_image = Some(uri.clone());
                Ok(Some(uri))
            }
            _ => {
                debug!("Capture from {} canceled", source);
                Ok(None)
            }
        }
    }

    /// Currently displayed image
    pub fn selected_image(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }

    /// Forget the selected image
    pub fn clear(&mut self) {
        self.selected_image = None;
    }
}

impl fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSession")
            .field("options", &self.options)
            .field("selected_image", &self.selected_image)
            .finish_non_exhaustive()
    }
}
