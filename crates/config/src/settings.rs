// Engine settings
// Loaded from ~/.config/salemap/settings.json, or from an explicit TOML file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Desktop Chrome user agent sent by both crime-page providers.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Persistent evidence cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Load at start and flush on save. Disabled = in-memory only.
    pub enabled: bool,

    /// Directory holding the cache documents (None = platform cache dir)
    pub dir: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheSettings {
    /// Configured directory, else `<cache_dir>/salemap`.
    pub fn effective_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("salemap")
        })
    }
}

/// Crime-grade page lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrimeSettings {
    /// Ask the provider chain at all. Disabled = income estimate only.
    pub enabled: bool,

    /// Probe for and use a headless browser when one is installed
    pub headless: bool,

    /// Explicit browser executable (skips the PATH search)
    pub browser_path: Option<PathBuf>,

    /// Site root; pages live at `{base_url}/safest-places-in-{zip}/`
    pub base_url: String,

    pub headless_timeout_secs: u64,

    /// Time given to scripts on the page before the DOM is captured
    pub settle_ms: u64,

    /// Direct fetch enabled
    pub direct: bool,

    pub request_timeout_secs: u64,

    /// Retries after the first direct attempt (network errors, 429, 5xx)
    pub max_retries: u32,

    /// First backoff delay; doubles per retry
    pub backoff_ms: u64,

    pub user_agent: String,
}

impl Default for CrimeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            headless: true,
            browser_path: None,
            base_url: "https://crimegrade.org".to_string(),
            headless_timeout_secs: 20,
            settle_ms: 2000,
            direct: true,
            request_timeout_secs: 15,
            max_retries: 2,
            backoff_ms: 1000,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl CrimeSettings {
    pub fn headless_timeout(&self) -> Duration {
        Duration::from_secs(self.headless_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// ZIP directory lookups (place name, coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceSettings {
    pub enabled: bool,

    /// Records live at `{base_url}/us/{zip}`
    pub base_url: String,

    pub timeout_secs: u64,
}

impl Default for PlaceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.zippopotam.us".to_string(),
            timeout_secs: 10,
        }
    }
}

impl PlaceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Scheduling between consecutive network attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolitenessSettings {
    /// Minimum gap between two network attempts (0 = none)
    pub delay_ms: u64,
}

impl Default for PolitenessSettings {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

impl PolitenessSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cache: CacheSettings,
    pub crime: CrimeSettings,
    pub places: PlaceSettings,
    pub politeness: PolitenessSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("salemap");
        config_dir.join("settings.json")
    }

    /// Load settings from the user config file, falling back to defaults
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    /// Load JSON settings from `path`. Missing or invalid files yield defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::from_json_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&contents)
    }

    /// Parse JSON settings. Lines starting with `//` are comments.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Save current settings as JSON to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }
}
