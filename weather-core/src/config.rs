use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{error::MonitorError, monitor::MonitorSettings};

pub const DEFAULT_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Top-level configuration stored on disk.
///
/// Every key is optional in the file; missing keys fall back to
/// [`Config::default`].
///
/// Example TOML:
/// ```toml
/// locations = ["Delhi", "Mumbai"]
/// interval_secs = 300
/// temp_threshold = 35.0
/// consecutive_alerts = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locations polled each cycle, in this order.
    pub locations: Vec<String>,

    /// Seconds to sleep between cycles.
    pub interval_secs: u64,

    /// Readings strictly above this (°C) count as a breach.
    pub temp_threshold: f64,

    /// Breaches in a row needed before alerting.
    pub consecutive_alerts: u32,

    /// Environment variable holding the provider API key.
    pub api_key_env: String,

    /// Fallback API key, used only when the environment variable is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub base_url: String,

    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locations: ["Delhi", "Mumbai", "Chennai", "Bangalore", "Kolkata", "Hyderabad"]
                .into_iter()
                .map(String::from)
                .collect(),
            interval_secs: 300,
            temp_threshold: 35.0,
            consecutive_alerts: 2,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if the
    /// file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-monitor", "weather-monitor")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check the settings make sense before anything is polled.
    pub fn validate(&self) -> Result<(), MonitorError> {
        self.settings().validate()?;

        if self.request_timeout_secs == 0 {
            return Err(MonitorError::Configuration(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Validated settings for [`crate::Monitor`].
    pub fn monitor_settings(&self) -> Result<MonitorSettings, MonitorError> {
        self.validate()?;
        Ok(self.settings())
    }

    fn settings(&self) -> MonitorSettings {
        MonitorSettings {
            locations: self.locations.clone(),
            interval: Duration::from_secs(self.interval_secs),
            temp_threshold: self.temp_threshold,
            consecutive_alerts: self.consecutive_alerts,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// API key from the process environment, falling back to the config file.
    pub fn api_key(&self) -> Result<String, MonitorError> {
        self.resolve_api_key(std::env::var(&self.api_key_env).ok())
    }

    /// Pick the API key given the value found in the environment, if any.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self, from_env: Option<String>) -> Result<String, MonitorError> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                MonitorError::Configuration(format!(
                    "OpenWeatherMap API key not found. Please set {}.",
                    self.api_key_env
                ))
            })
    }
}
