//! Playback session - core orchestration
//!
//! Owns the current playlist position and the single audio resource loaded in
//! the engine. All mutation happens through `&mut self` on one driver task;
//! the only concurrent input is the engine's status reports, which are queued
//! and applied when drained.

use crate::{
    error::{PlaybackError, Result},
    events::SessionEvent,
    types::{NowPlaying, PlaybackConfig},
};
use std::sync::Arc;
use std::time::Duration;
use tapedeck_core::{
    EngineError, MediaPlaybackEngine, Playlist, ResourceHandle, StatusReport, StatusSink, Track,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Player screen session
///
/// Lifecycle: create with [`new`](Self::new), load the first track with
/// [`mount`](Self::mount), release with [`close`](Self::close) when the screen
/// goes away. At most one resource is held at a time; switching tracks always
/// releases the old resource before the new one is requested.
pub struct PlaybackSession {
    engine: Arc<dyn MediaPlaybackEngine>,
    playlist: Playlist,
    config: PlaybackConfig,

    current_index: usize,

    // The only live resource, exclusively owned
    loaded: Option<ResourceHandle>,

    // Last observed engine state
    is_playing: bool,
    is_loaded: bool,
    position: Duration,
    duration: Option<Duration>,

    // Status reports from the engine; the sink is cloned into every load
    status_sink: StatusSink,
    status_rx: mpsc::UnboundedReceiver<StatusReport>,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl PlaybackSession {
    /// Create a session positioned at the first track, with nothing loaded
    pub fn new(
        engine: Arc<dyn MediaPlaybackEngine>,
        playlist: Playlist,
        config: PlaybackConfig,
    ) -> Self {
        let (status_sink, status_rx) = StatusSink::channel();

        Self {
            engine,
            playlist,
            config,
            current_index: 0,
            loaded: None,
            is_playing: false,
            is_loaded: false,
            position: Duration::ZERO,
            duration: None,
            status_sink,
            status_rx,
            pending_events: Vec::new(),
        }
    }

    /// Load the configured start track
    pub async fn mount(&mut self) -> Result<()> {
        self.load_track(self.config.start_index).await
    }

    /// Release the loaded resource
    ///
    /// Idempotent. The session can be reused afterwards with `load_track`.
    pub async fn close(&mut self) {
        self.release().await;
    }

    // ===== Track Loading =====

    /// Replace the loaded resource with the track at `index`
    ///
    /// The previous resource is released before the engine is asked for the
    /// new one, so even a failed load leaves nothing behind. On failure the
    /// session stays on `index` with nothing loaded and can simply be asked
    /// to load again.
    pub async fn load_track(&mut self, index: usize) -> Result<()> {
        let track = self
            .playlist
            .get(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds {
                index,
                len: self.playlist.len(),
            })?;

        // Apply anything the old resource reported before it goes away
        self.pump_status();
        self.release().await;

        self.current_index = index;
        self.pending_events.push(SessionEvent::TrackChanged {
            index,
            title: track.title.clone(),
        });

        info!("Loading track {} '{}' ({})", index, track.title, track.audio_uri);

        match self
            .engine
            .load(&track.audio_uri, self.config.autoplay, self.status_sink.clone())
            .await
        {
            Ok(handle) => {
                debug!("Track {} loaded as {}", index, handle);
                self.loaded = Some(handle);
                if self.config.autoplay {
                    self.set_playing(true);
                }
                Ok(())
            }
            Err(err) => {
                warn!("Failed to load track {} ({}): {}", index, track.audio_uri, err);
                self.pending_events.push(SessionEvent::Error {
                    message: err.to_string(),
                });
                Err(PlaybackError::Load {
                    uri: track.audio_uri,
                    source: err,
                })
            }
        }
    }

    /// Release the current resource, if any, and forget its observed state
    async fn release(&mut self) {
        if let Some(handle) = self.loaded.take() {
            debug!("Releasing {}", handle);
            self.engine.unload(handle).await;
        }
        self.reset_observed();
    }

    fn reset_observed(&mut self) {
        self.is_playing = false;
        self.is_loaded = false;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    // ===== Transport =====

    /// Pause if playing, resume if paused
    ///
    /// Decided from a fresh engine status query rather than the cached flag.
    /// No-op while nothing is loaded or the resource is still buffering, and
    /// when the engine rejects the call because the resource went stale.
    pub async fn toggle_play_pause(&mut self) -> Result<()> {
        self.pump_status();

        let Some(handle) = self.loaded else {
            debug!("toggle_play_pause ignored: nothing loaded");
            return Ok(());
        };

        let status = match self.engine.status(handle).await {
            Ok(status) => status,
            Err(err) => return Self::absorb_stale(err),
        };

        if !status.is_loaded {
            debug!("toggle_play_pause ignored: {} not loaded yet", handle);
            return Ok(());
        }

        if status.is_playing {
            if let Err(err) = self.engine.pause(handle).await {
                return Self::absorb_stale(err);
            }
            self.set_playing(false);
        } else {
            if let Err(err) = self.engine.play(handle).await {
                return Self::absorb_stale(err);
            }
            self.set_playing(true);
        }

        Ok(())
    }

    /// Jump to `target` in the current track
    ///
    /// Only issued once a status report has confirmed the resource is loaded;
    /// before that the call is dropped without reaching the engine.
    pub async fn seek(&mut self, target: Duration) -> Result<()> {
        self.pump_status();

        let Some(handle) = self.loaded else {
            debug!("seek ignored: nothing loaded");
            return Ok(());
        };

        if !self.is_loaded {
            debug!("seek ignored: {} not loaded yet", handle);
            return Ok(());
        }

        if let Err(err) = self.engine.seek(handle, target).await {
            return Self::absorb_stale(err);
        }

        self.position = target;
        Ok(())
    }

    /// Seek to a fraction (0.0 - 1.0) of the track duration
    ///
    /// Out-of-range fractions are clamped. No-op while the duration is unknown.
    pub async fn seek_fraction(&mut self, fraction: f32) -> Result<()> {
        if !fraction.is_finite() {
            return Err(PlaybackError::InvalidSeekFraction(fraction));
        }

        self.pump_status();

        let Some(duration) = self.duration else {
            debug!("seek_fraction ignored: duration unknown");
            return Ok(());
        };

        // Durations near Duration::MAX round past it in floating point
        let scaled = duration.as_secs_f64() * f64::from(fraction.clamp(0.0, 1.0));
        let target = Duration::try_from_secs_f64(scaled).map_or(duration, |t| t.min(duration));
        self.seek(target).await
    }

    /// Advance to the next track
    ///
    /// Returns `false` without touching the engine at the end of the playlist.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Result<bool> {
        if !self.has_next() {
            debug!("next ignored: already at last track");
            return Ok(false);
        }

        self.load_track(self.current_index + 1).await?;
        Ok(true)
    }

    /// Go back to the previous track
    ///
    /// Returns `false` without touching the engine at the start of the playlist.
    pub async fn previous(&mut self) -> Result<bool> {
        if !self.has_previous() {
            debug!("previous ignored: already at first track");
            return Ok(false);
        }

        self.load_track(self.current_index - 1).await?;
        Ok(true)
    }

    /// Stale-resource races are expected; anything else is reported
    fn absorb_stale(err: EngineError) -> Result<()> {
        if err.is_state() {
            debug!("Transport call dropped: {}", err);
            Ok(())
        } else {
            Err(PlaybackError::Engine(err))
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.pending_events.push(SessionEvent::StateChanged { playing });
        }
    }

    // ===== Status Reports =====

    /// Apply one status report
    ///
    /// Reports for any handle other than the currently loaded one are stale
    /// and ignored. Returns whether the report was applied.
    pub fn apply_status(&mut self, report: StatusReport) -> bool {
        if self.loaded != Some(report.handle) {
            debug!("Ignoring stale status for {}", report.handle);
            return false;
        }

        let status = report.status;
        self.is_loaded = status.is_loaded;
        self.position = status.position;
        self.duration = status.duration;
        self.set_playing(status.is_playing);

        self.pending_events.push(SessionEvent::PositionUpdate {
            position_ms: status.position.as_millis() as u64,
            duration_ms: status.duration.map(|d| d.as_millis() as u64),
        });

        true
    }

    /// Apply every queued status report without waiting
    ///
    /// Returns the number of reports that were applied (stale ones excluded).
    pub fn pump_status(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(report) = self.status_rx.try_recv() {
            if self.apply_status(report) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next status report and apply it
    ///
    /// Meant for `select!` loops in front ends. Returns whether the report
    /// was applied.
    pub async fn next_status(&mut self) -> bool {
        match self.status_rx.recv().await {
            Some(report) => self.apply_status(report),
            None => false,
        }
    }

    // ===== State Queries =====

    /// Index of the current track
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The current track
    pub fn current_track(&self) -> &Track {
        // current_index is only ever set from a successful playlist lookup
        &self.playlist.tracks()[self.current_index]
    }

    /// The playlist this session plays
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Session configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Whether audio is believed to be playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the last status report said the resource is loaded
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Last reported position
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Last reported duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Handle of the loaded resource
    pub fn loaded_handle(&self) -> Option<ResourceHandle> {
        self.loaded
    }

    /// Whether `next` would move
    pub fn has_next(&self) -> bool {
        self.current_index < self.playlist.last_index()
    }

    /// Whether `previous` would move
    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Snapshot for rendering the player screen
    pub fn now_playing(&self) -> NowPlaying {
        let track = self.current_track();
        NowPlaying {
            index: self.current_index,
            title: track.title.clone(),
            artwork_uri: track.artwork_uri.clone(),
            is_playing: self.is_playing,
            is_loaded: self.is_loaded,
            position: self.position,
            duration: self.duration,
        }
    }

    // ===== Events =====

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        let Some(handle) = self.loaded.take() else {
            return;
        };

        warn!("Session dropped while holding {}; call close() first", handle);

        // Best effort: unload in the background if a runtime is around
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let engine = Arc::clone(&self.engine);
            runtime.spawn(async move {
                engine.unload(handle).await;
            });
        }
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("current_index", &self.current_index)
            .field("loaded", &self.loaded)
            .field("is_playing", &self.is_playing)
            .field("is_loaded", &self.is_loaded)
            .field("position", &self.position)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tapedeck_core::{EngineStatus, Track};

    /// Engine whose transport calls all fail as stale
    struct StaleEngine;

    #[async_trait]
    impl MediaPlaybackEngine for StaleEngine {
        async fn load(
            &self,
            _uri: &str,
            _autoplay: bool,
            _on_status: StatusSink,
        ) -> std::result::Result<ResourceHandle, EngineError> {
            Ok(ResourceHandle::new(1))
        }

        async fn play(&self, handle: ResourceHandle) -> std::result::Result<(), EngineError> {
            Err(EngineError::state(format!("{} unloaded", handle)))
        }

        async fn pause(&self, handle: ResourceHandle) -> std::result::Result<(), EngineError> {
            Err(EngineError::state(format!("{} unloaded", handle)))
        }

        async fn seek(
            &self,
            handle: ResourceHandle,
            _position: Duration,
        ) -> std::result::Result<(), EngineError> {
            Err(EngineError::state(format!("{} unloaded", handle)))
        }

        async fn status(
            &self,
            _handle: ResourceHandle,
        ) -> std::result::Result<EngineStatus, EngineError> {
            Ok(EngineStatus::loaded(true, Duration::ZERO, None))
        }

        async fn unload(&self, _handle: ResourceHandle) {}
    }

    fn two_tracks() -> Playlist {
        Playlist::new(vec![
            Track::new("One", "mem://1", "img://1"),
            Track::new("Two", "mem://2", "img://2"),
        ])
        .unwrap()
    }

    #[test]
    fn new_session_is_idle_at_first_track() {
        let session =
            PlaybackSession::new(Arc::new(StaleEngine), two_tracks(), PlaybackConfig::default());

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_track().title, "One");
        assert!(session.loaded_handle().is_none());
        assert!(!session.is_playing());
        assert!(session.has_next());
        assert!(!session.has_previous());
        assert!(!session.has_pending_events());
    }

    #[tokio::test]
    async fn stale_engine_errors_are_swallowed() {
        let mut session =
            PlaybackSession::new(Arc::new(StaleEngine), two_tracks(), PlaybackConfig::default());
        session.mount().await.unwrap();
        session.drain_events();

        // Engine says playing, pause is rejected as stale
        session.toggle_play_pause().await.unwrap();
        assert!(session.is_playing());
        assert!(session.drain_events().is_empty());
    }

    #[tokio::test]
    async fn out_of_bounds_load_changes_nothing() {
        let mut session =
            PlaybackSession::new(Arc::new(StaleEngine), two_tracks(), PlaybackConfig::default());

        let err = session.load_track(2).await.unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::IndexOutOfBounds { index: 2, len: 2 }
        ));
        assert_eq!(session.current_index(), 0);
        assert!(session.loaded_handle().is_none());
    }

    #[tokio::test]
    async fn non_finite_seek_fraction_is_rejected() {
        let mut session =
            PlaybackSession::new(Arc::new(StaleEngine), two_tracks(), PlaybackConfig::default());

        assert!(matches!(
            session.seek_fraction(f32::NAN).await,
            Err(PlaybackError::InvalidSeekFraction(_))
        ));
    }
}
