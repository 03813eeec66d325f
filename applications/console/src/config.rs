/// Console configuration
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tapedeck_core::Playlist;
use tapedeck_playback::PlaybackConfig;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tapedeck.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub permissions: PermissionSettings,

    #[serde(default)]
    pub playlist: Playlist,
}

/// Behaviour of the in-memory playback engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Time between status reports, also the buffering delay before a
    /// resource reports itself loaded
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,

    /// Length every simulated track reports
    #[serde(default = "default_track_duration_secs")]
    pub track_duration_secs: u64,

    /// URIs that fail to load
    #[serde(default)]
    pub fail_uris: Vec<String>,
}

/// Answers given by the console permission gate
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PermissionSettings {
    #[serde(default = "default_granted")]
    pub camera: bool,

    #[serde(default = "default_granted")]
    pub library: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            simulation: SimulationSettings::default(),
            permissions: PermissionSettings::default(),
            playlist: Playlist::demo(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval_ms(),
            track_duration_secs: default_track_duration_secs(),
            fail_uris: Vec::new(),
        }
    }
}

impl Default for PermissionSettings {
    fn default() -> Self {
        Self {
            camera: default_granted(),
            library: default_granted(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `tapedeck.toml` in the
    /// working directory is used if present. Environment variables prefixed
    /// with `TAPEDECK_` override file values, with `__` between nested keys
    /// (e.g. `TAPEDECK_SIMULATION__STATUS_INTERVAL_MS=250`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TAPEDECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.status_interval_ms == 0 {
            return Err(ConsoleError::Config(
                "simulation.status_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.simulation.track_duration_secs == 0 {
            return Err(ConsoleError::Config(
                "simulation.track_duration_secs must be greater than 0".to_string(),
            ));
        }

        if self.playback.start_index >= self.playlist.len() {
            return Err(ConsoleError::Config(format!(
                "playback.start_index {} is outside the playlist ({} tracks)",
                self.playback.start_index,
                self.playlist.len()
            )));
        }

        Ok(())
    }

    /// Render as TOML (used by `tapedeck config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConsoleError::Config(e.to_string()))
    }
}

// Default values
fn default_status_interval_ms() -> u64 {
    500
}

fn default_track_duration_secs() -> u64 {
    180
}

fn default_granted() -> bool {
    true
}
