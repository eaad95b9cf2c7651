//! CLI configuration

use crate::error::{CliError, Result};
use reel_playback::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "reel.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub player: EngineConfig,

    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}

impl ReelConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `reel.toml` is used if
    /// present. `REEL_`-prefixed variables override file values, with `__`
    /// between section and key (`REEL_PLAYER__PHOTO_DURATION_MS=3000`).
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

        // Override with environment variables (prefixed with REEL_)
        settings = settings.add_source(
            config::Environment::with_prefix("REEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if self.storage.settings_path.as_os_str().is_empty() {
            return Err(CliError::Config(
                "storage.settings_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("./data/settings.json")
}
