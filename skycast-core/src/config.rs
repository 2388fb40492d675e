use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::align::DEFAULT_HOURLY_WINDOW;
use crate::{forecast, geocode};

/// Top-level configuration stored on disk.
///
/// Everything has a default; a missing config file is not an error, and a
/// partial file only overrides the fields it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City fetched on startup before any input.
    pub default_city: String,

    /// Quiet period after the last keystroke before suggestions are fetched.
    pub debounce_ms: u64,

    /// Number of hours shown in the hourly strip.
    pub hourly_window: usize,

    /// Open-Meteo geocoding endpoint. Overridable mainly for tests.
    pub geocoding_url: String,

    /// Open-Meteo forecast endpoint.
    pub forecast_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: "London".to_string(),
            debounce_ms: 300,
            hourly_window: DEFAULT_HOURLY_WINDOW,
            geocoding_url: geocode::GEOCODING_URL.to_string(),
            forecast_url: forecast::FORECAST_URL.to_string(),
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
