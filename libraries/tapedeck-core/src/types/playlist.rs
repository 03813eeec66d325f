/// Playlist domain types
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A playable entry in a playlist
///
/// Tracks are defined once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title
    pub title: String,

    /// Location of the audio stream handed to the playback engine
    pub audio_uri: String,

    /// Location of the cover image shown while the track is current
    pub artwork_uri: String,
}

impl Track {
    /// Create a new track
    pub fn new(
        title: impl Into<String>,
        audio_uri: impl Into<String>,
        artwork_uri: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            audio_uri: audio_uri.into(),
            artwork_uri: artwork_uri.into(),
        }
    }
}

/// Fixed, ordered, non-empty sequence of tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist
    ///
    /// # Errors
    /// Returns `CoreError::EmptyPlaylist` if `tracks` is empty
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Three-track demo playlist used when nothing else is configured
    pub fn demo() -> Self {
        let tracks = (1..=3)
            .map(|n| {
                Track::new(
                    format!("Track {}", n),
                    format!("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{}.mp3", n),
                    format!("https://picsum.photos/seed/song{}/400/400", n),
                )
            })
            .collect();
        Self { tracks }
    }

    /// Get a track by index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed playlist
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the last track
    pub fn last_index(&self) -> usize {
        self.tracks.len().saturating_sub(1)
    }

    /// Iterate tracks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Borrow the tracks as a slice
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::demo()
    }
}

impl TryFrom<Vec<Track>> for Playlist {
    type Error = CoreError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

impl From<Playlist> for Vec<Track> {
    fn from(playlist: Playlist) -> Self {
        playlist.tracks
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_playlist_is_rejected() {
        assert_eq!(Playlist::new(Vec::new()), Err(CoreError::EmptyPlaylist));
    }

    #[test]
    fn demo_playlist_has_three_tracks() {
        let playlist = Playlist::demo();
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.last_index(), 2);
        assert_eq!(playlist.get(0).unwrap().title, "Track 1");
        assert!(playlist
            .get(2)
            .unwrap()
            .audio_uri
            .ends_with("SoundHelix-Song-3.mp3"));
        assert!(playlist.get(3).is_none());
    }

    #[test]
    fn deserializing_empty_list_fails() {
        let result: std::result::Result<Playlist, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn serde_roundtrip_keeps_order() {
        let playlist = Playlist::new(vec![
            Track::new("b", "mem://b", "img://b"),
            Track::new("a", "mem://a", "img://a"),
        ])
        .unwrap();

        let json = serde_json::to_string(&playlist).unwrap();
        let back: Playlist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, playlist);
        assert_eq!(back.get(0).unwrap().title, "b");
    }
}
