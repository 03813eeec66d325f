//! Console stand-ins for the permission prompts and image picker

use crate::config::PermissionSettings;
use async_trait::async_trait;
use tapedeck_core::{
    ImagePicker, PermissionGate, PermissionStatus, PickedAsset, PickerOptions, PickerResult,
};
use tracing::debug;

/// Permission gate answering from configuration
pub struct ConfiguredGate {
    settings: PermissionSettings,
}

impl ConfiguredGate {
    pub fn new(settings: PermissionSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PermissionGate for ConfiguredGate {
    async fn request_camera(&self) -> PermissionStatus {
        debug!("Camera permission requested: {}", self.settings.camera);
        self.settings.camera.into()
    }

    async fn request_library(&self) -> PermissionStatus {
        debug!("Library permission requested: {}", self.settings.library);
        self.settings.library.into()
    }
}

/// Picker that "returns" the URI given on the command line
///
/// No URI means the user backed out of the picker.
pub struct ArgumentPicker {
    uri: Option<String>,
}

impl ArgumentPicker {
    pub fn new(uri: Option<String>) -> Self {
        Self { uri }
    }

    fn result(&self) -> PickerResult {
        match &self.uri {
            Some(uri) => PickerResult::Picked(vec![PickedAsset::new(uri.clone())]),
            None => PickerResult::Canceled,
        }
    }
}

#[async_trait]
impl ImagePicker for ArgumentPicker {
    async fn launch_camera(&self, options: PickerOptions) -> tapedeck_core::Result<PickerResult> {
        debug!("Camera launched with {:?}", options);
        Ok(self.result())
    }

    async fn launch_library(&self, options: PickerOptions) -> tapedeck_core::Result<PickerResult> {
        debug!("Library launched with {:?}", options);
        Ok(self.result())
    }
}
