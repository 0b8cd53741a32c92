/// Application configuration
use anyhow::{ensure, Context, Result};
use cadence_server_client::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    /// Used to estimate track length from the downloaded size
    #[serde(default = "default_nominal_bitrate_kbps")]
    pub nominal_bitrate_kbps: u32,

    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// JSON file replacing the bundled offline playlist
    pub fallback_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `cadence.toml` is optional.
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

        // Override with environment variables (CADENCE_SERVER__URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        settings
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.server.url.is_empty(), "server.url is required");
        ensure!(
            self.playback.initial_volume <= 100,
            "playback.initial_volume must be 0-100, got {}",
            self.playback.initial_volume
        );
        ensure!(
            self.playback.nominal_bitrate_kbps > 0,
            "playback.nominal_bitrate_kbps must be positive"
        );
        ensure!(
            self.playback.tick_millis > 0,
            "playback.tick_millis must be positive"
        );
        Ok(())
    }

    /// HTTP client settings
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.url.clone()).with_timeouts(
            Duration::from_secs(self.server.timeout_secs),
            Duration::from_secs(self.server.connect_timeout_secs),
        )
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.playback.tick_millis)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            playback: default_playback(),
            catalog: CatalogSettings::default(),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        initial_volume: default_initial_volume(),
        nominal_bitrate_kbps: default_nominal_bitrate_kbps(),
        tick_millis: default_tick_millis(),
    }
}

fn default_initial_volume() -> u8 {
    100
}

fn default_nominal_bitrate_kbps() -> u32 {
    128
}

fn default_tick_millis() -> u64 {
    500
}
