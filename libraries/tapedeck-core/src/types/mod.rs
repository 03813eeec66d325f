mod capture;
mod media;
mod playlist;

pub use capture::{PermissionStatus, PickedAsset, PickerOptions, PickerResult};
pub use media::{EngineStatus, ResourceHandle, StatusReport, StatusSink};
pub use playlist::{Playlist, Track};
