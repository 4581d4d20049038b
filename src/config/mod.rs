//! Configuration module for covid-tracker
//!
//! Holds the API endpoints and the UI preferences that persist across
//! sessions. Fetched statistics are never persisted.
//!
//! # App Data Location
//!
//! Configuration is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/com.supercoolapps.covidtracker/`
//! - **macOS**: `~/Library/Application Support/com.supercoolapps.covidtracker/`
//! - **Windows**: `%APPDATA%\com.supercoolapps.covidtracker\`
//!
//! # Example
//!
//! ```ignore
//! use covid_tracker::config::AppConfig;
//!
//! let mut config = AppConfig::load_or_default();
//! config.ui.dark_mode = false;
//! config.save()?;
//! ```

use crate::error::{Result, ResultExt, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "com.supercoolapps.covidtracker";

/// Config filename
pub const CONFIG_FILE: &str = "config.json";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.covidtracking.com/v1/";

/// Default path of the national daily series
pub const DEFAULT_NATIONAL_PATH: &str = "us/daily.json";

/// Default path of the per-state daily series
pub const DEFAULT_STATES_PATH: &str = "states/daily.json";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        TrackerError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            TrackerError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== API Config ====================

/// Where and how the statistics are fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL, must end with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the national series relative to the base URL
    #[serde(default = "default_national_path")]
    pub national_path: String,

    /// Path of the per-state series relative to the base URL
    #[serde(default = "default_states_path")]
    pub states_path: String,

    /// Per-request timeout; the HTTP client's default when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    #[serde(default = "default_true")]
    pub use_system_proxy: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_national_path() -> String {
    DEFAULT_NATIONAL_PATH.to_string()
}

fn default_states_path() -> String {
    DEFAULT_STATES_PATH.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            national_path: default_national_path(),
            states_path: default_states_path(),
            request_timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

impl ApiConfig {
    /// Config pointing at another server with the default paths
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn national_url(&self) -> Result<reqwest::Url> {
        self.join(&self.national_path)
    }

    pub fn states_url(&self) -> Result<reqwest::Url> {
        self.join(&self.states_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn join(&self, path: &str) -> Result<reqwest::Url> {
        reqwest::Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| {
                TrackerError::Config(format!(
                    "Invalid API URL {:?} + {:?}: {}",
                    self.base_url, path, e
                ))
            })
    }
}

// ==================== UI Preferences ====================

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    /// Chart line width
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Draw grid lines behind the chart
    #[serde(default)]
    pub show_grid: bool,

    /// Mark the scrubbed day with a vertical line
    #[serde(default = "default_true")]
    pub show_scrub_line: bool,
}

fn default_font_scale() -> f32 {
    1.0
}

fn default_line_width() -> f32 {
    2.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
            line_width: 2.0,
            show_grid: false,
            show_scrub_line: true,
        }
    }
}

// ==================== App Config ====================

/// Persistent application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

fn default_config_version() -> u32 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api: ApiConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            TrackerError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            TrackerError::Config(format!("Failed to parse config {:?}: {}", path, e))
        })
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    /// Save config to an explicit file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {:?}", path))
    }
}
