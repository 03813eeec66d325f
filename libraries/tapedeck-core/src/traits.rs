/// Capability traits implemented by the platform
use crate::error::{EngineError, Result};
use crate::types::{
    EngineStatus, PermissionStatus, PickerOptions, PickerResult, ResourceHandle, StatusSink,
};
use async_trait::async_trait;
use std::time::Duration;

/// Audio playback engine
///
/// Decodes and outputs a single audio resource per handle. Every transport
/// call suspends the caller until the engine has acknowledged it.
///
/// Status snapshots are pushed through the [`StatusSink`] given to
/// [`load`](Self::load), tagged with the handle they describe. They may arrive
/// at any time, including while another call on the same engine is in flight.
#[async_trait]
pub trait MediaPlaybackEngine: Send + Sync {
    /// Start loading the resource at `uri`
    ///
    /// With `autoplay` the resource starts playing as soon as it can.
    ///
    /// # Errors
    /// `EngineError::Load` on network, codec or permission failure
    async fn load(
        &self,
        uri: &str,
        autoplay: bool,
        on_status: StatusSink,
    ) -> std::result::Result<ResourceHandle, EngineError>;

    /// Resume or start output
    ///
    /// # Errors
    /// `EngineError::State` if the handle is stale or unloaded
    async fn play(&self, handle: ResourceHandle) -> std::result::Result<(), EngineError>;

    /// Pause output
    ///
    /// # Errors
    /// `EngineError::State` if the handle is stale or unloaded
    async fn pause(&self, handle: ResourceHandle) -> std::result::Result<(), EngineError>;

    /// Jump to `position`
    ///
    /// # Errors
    /// `EngineError::State` if the resource is not loaded yet
    async fn seek(
        &self,
        handle: ResourceHandle,
        position: Duration,
    ) -> std::result::Result<(), EngineError>;

    /// Query the current status of a resource
    async fn status(&self, handle: ResourceHandle) -> std::result::Result<EngineStatus, EngineError>;

    /// Release a resource
    ///
    /// Idempotent: unloading an unknown or already released handle is a no-op.
    async fn unload(&self, handle: ResourceHandle);
}

/// Runtime permission prompts for image capture
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Ask for camera access
    async fn request_camera(&self) -> PermissionStatus;

    /// Ask for photo library access
    async fn request_library(&self) -> PermissionStatus;

    /// Ask for everything capture needs
    ///
    /// Both prompts are always shown; the result is granted only if both are.
    async fn request_capture(&self) -> PermissionStatus {
        let camera = self.request_camera().await;
        let library = self.request_library().await;
        camera.and(library)
    }
}

/// Platform camera and photo library picker
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Take a new photo with the camera
    async fn launch_camera(&self, options: PickerOptions) -> Result<PickerResult>;

    /// Choose an existing image from the library
    async fn launch_library(&self, options: PickerOptions) -> Result<PickerResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGate {
        camera: PermissionStatus,
        library: PermissionStatus,
        prompts: AtomicUsize,
    }

    #[async_trait]
    impl PermissionGate for FixedGate {
        async fn request_camera(&self) -> PermissionStatus {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.camera
        }

        async fn request_library(&self) -> PermissionStatus {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.library
        }
    }

    #[tokio::test]
    async fn capture_needs_camera_and_library() {
        let gate = FixedGate {
            camera: PermissionStatus::Granted,
            library: PermissionStatus::Denied,
            prompts: AtomicUsize::new(0),
        };

        assert_eq!(gate.request_capture().await, PermissionStatus::Denied);
        // Both prompts shown even though the first one would already decide
        assert_eq!(gate.prompts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn capture_granted_when_both_granted() {
        let gate = FixedGate {
            camera: PermissionStatus::Granted,
            library: PermissionStatus::Granted,
            prompts: AtomicUsize::new(0),
        };

        assert_eq!(gate.request_capture().await, PermissionStatus::Granted);
    }
}
