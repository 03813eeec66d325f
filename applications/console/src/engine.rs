//! In-memory playback engine
//!
//! Stands in for the platform player: no audio is decoded, but every loaded
//! resource gets a ticker task that buffers, reports itself loaded, and
//! advances its position while playing.

use crate::config::SimulationSettings;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tapedeck_core::{EngineError, EngineStatus, MediaPlaybackEngine, ResourceHandle, StatusSink};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

struct Resource {
    uri: String,
    status: Arc<Mutex<EngineStatus>>,
    ticker: JoinHandle<()>,
}

pub struct SimulatedEngine {
    interval: Duration,
    track_duration: Duration,
    fail_uris: HashSet<String>,
    next_id: AtomicU64,
    resources: Mutex<HashMap<ResourceHandle, Resource>>,
}

impl SimulatedEngine {
    pub fn new(settings: &SimulationSettings) -> Self {
        Self {
            interval: Duration::from_millis(settings.status_interval_ms),
            track_duration: Duration::from_secs(settings.track_duration_secs),
            fail_uris: settings.fail_uris.iter().cloned().collect(),
            next_id: AtomicU64::new(1),
            resources: Mutex::new(HashMap::new()),
        }
    }

    /// Number of resources currently loaded
    pub fn live_count(&self) -> usize {
        self.lock_resources().len()
    }

    fn lock_resources(&self) -> MutexGuard<'_, HashMap<ResourceHandle, Resource>> {
        // A poisoned map only means a ticker panicked; the data is still usable
        self.resources
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn status_cell(
        &self,
        handle: ResourceHandle,
    ) -> Result<Arc<Mutex<EngineStatus>>, EngineError> {
        self.lock_resources()
            .get(&handle)
            .map(|resource| Arc::clone(&resource.status))
            .ok_or_else(|| EngineError::state(format!("{} is not loaded", handle)))
    }

    /// Apply `change` to a loaded resource's status
    fn update(
        &self,
        handle: ResourceHandle,
        change: impl FnOnce(&mut EngineStatus) -> Result<(), EngineError>,
    ) -> Result<EngineStatus, EngineError> {
        let cell = self.status_cell(handle)?;
        let mut status = lock_status(&cell);
        change(&mut status)?;
        Ok(*status)
    }
}

fn lock_status(cell: &Mutex<EngineStatus>) -> MutexGuard<'_, EngineStatus> {
    cell.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Advance one tick and return the snapshot to report
fn tick(
    status: &mut EngineStatus,
    step: Duration,
    track_duration: Duration,
    autoplay: bool,
) -> EngineStatus {
    if !status.is_loaded {
        // Buffering done
        status.is_loaded = true;
        status.is_playing = autoplay;
        status.duration = Some(track_duration);
    } else if status.is_playing {
        status.position = (status.position + step).min(track_duration);
        if status.position >= track_duration {
            status.is_playing = false;
        }
    }
    *status
}

#[async_trait]
impl MediaPlaybackEngine for SimulatedEngine {
    async fn load(
        &self,
        uri: &str,
        autoplay: bool,
        on_status: StatusSink,
    ) -> Result<ResourceHandle, EngineError> {
        if self.fail_uris.contains(uri) {
            return Err(EngineError::load(format!("{} could not be opened", uri)));
        }

        let handle = ResourceHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let status = Arc::new(Mutex::new(EngineStatus::unloaded()));

        let ticker = {
            let status = Arc::clone(&status);
            let step = self.interval;
            let track_duration = self.track_duration;

            tokio::spawn(async move {
                let mut ticks = interval_at(Instant::now() + step, step);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    ticks.tick().await;
                    let snapshot = tick(&mut lock_status(&status), step, track_duration, autoplay);
                    trace!("{} tick: {:?}", handle, snapshot);
                    on_status.report(handle, snapshot);

                    if on_status.is_closed() {
                        break;
                    }
                }
            })
        };

        debug!("Loaded {} as {}", uri, handle);
        self.lock_resources().insert(
            handle,
            Resource {
                uri: uri.to_string(),
                status,
                ticker,
            },
        );

        Ok(handle)
    }

    async fn play(&self, handle: ResourceHandle) -> Result<(), EngineError> {
        self.update(handle, |status| {
            if !status.is_loaded {
                return Err(EngineError::state(format!("{} still buffering", handle)));
            }
            status.is_playing = true;
            Ok(())
        })
        .map(|_| ())
    }

    async fn pause(&self, handle: ResourceHandle) -> Result<(), EngineError> {
        self.update(handle, |status| {
            status.is_playing = false;
            Ok(())
        })
        .map(|_| ())
    }

    async fn seek(&self, handle: ResourceHandle, position: Duration) -> Result<(), EngineError> {
        let track_duration = self.track_duration;
        self.update(handle, |status| {
            if !status.is_loaded {
                return Err(EngineError::state(format!("{} still buffering", handle)));
            }
            status.position = position.min(track_duration);
            Ok(())
        })
        .map(|_| ())
    }

    async fn status(&self, handle: ResourceHandle) -> Result<EngineStatus, EngineError> {
        self.update(handle, |_| Ok(()))
    }

    async fn unload(&self, handle: ResourceHandle) {
        if let Some(resource) = self.lock_resources().remove(&handle) {
            resource.ticker.abort();
            debug!("Unloaded {} ({})", handle, resource.uri);
        }
    }
}

impl Drop for SimulatedEngine {
    fn drop(&mut self) {
        for (_, resource) in self.lock_resources().drain() {
            resource.ticker.abort();
        }
    }
}
