/// Image capture types
use serde::{Deserialize, Serialize};

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Access allowed
    Granted,
    /// Access refused (or not determined)
    Denied,
}

impl PermissionStatus {
    /// Whether access was allowed
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }

    /// Combine two permissions; granted only if both are
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self.is_granted() && other.is_granted() {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// Options passed to the camera / photo library picker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerOptions {
    /// Let the user crop/edit before confirming
    pub allows_editing: bool,

    /// Compression quality, 0.0 (smallest) to 1.0 (best)
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            quality: 1.0,
        }
    }
}

/// An image returned by the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedAsset {
    /// Local device URI of the image
    pub uri: String,

    /// Pixel width, when the platform reports it
    pub width: Option<u32>,

    /// Pixel height, when the platform reports it
    pub height: Option<u32>,
}

impl PickedAsset {
    /// Asset with only a URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
        }
    }
}

/// Result of launching the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickerResult {
    /// User dismissed the picker
    Canceled,
    /// User confirmed one or more images
    Picked(Vec<PickedAsset>),
}

impl PickerResult {
    /// URI of the first picked asset, if any
    pub fn first_uri(&self) -> Option<&str> {
        match self {
            Self::Canceled => None,
            Self::Picked(assets) => assets.first().map(|asset| asset.uri.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_and_requires_both() {
        use PermissionStatus::{Denied, Granted};

        assert_eq!(Granted.and(Granted), Granted);
        assert_eq!(Granted.and(Denied), Denied);
        assert_eq!(Denied.and(Granted), Denied);
        assert_eq!(Denied.and(Denied), Denied);
    }

    #[test]
    fn first_uri_of_result() {
        assert_eq!(PickerResult::Canceled.first_uri(), None);
        assert_eq!(PickerResult::Picked(Vec::new()).first_uri(), None);

        let picked = PickerResult::Picked(vec![
            PickedAsset::new("file:///a.jpg"),
            PickedAsset::new("file:///b.jpg"),
        ]);
        assert_eq!(picked.first_uri(), Some("file:///a.jpg"));
    }
}
