//! Configuration management for watchpage
//!
//! This module handles loading and managing the tunables of the page
//! controls from config files and environment variables.

use crate::utils::error::{IntoPageError, Result, WatchPageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playback control configuration
    pub controls: ControlsConfig,

    /// Toast configuration
    pub toast: ToastConfig,

    /// Pointer and touch gesture configuration
    pub gestures: GesturesConfig,

    /// Dropdown menu configuration
    pub dropdown: DropdownConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Playback control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Space must stay down this long before it counts as a hold
    pub hold_threshold_ms: u64,

    /// Playback speed while boosted
    pub boost_speed: f64,

    /// Seek step in seconds for arrow keys and swipes
    pub seek_step_secs: f64,

    /// Volume step (0.0 to 1.0)
    pub volume_step: f64,

    /// Lifetime of shortcut feedback toasts
    pub shortcut_toast_ms: u64,
}

/// Toast configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Default toast lifetime
    pub default_duration_ms: u64,
}

/// Gesture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GesturesConfig {
    /// Second click must land within this window
    pub double_click_window_ms: u64,

    /// Lifetime of the speed toggle toast
    pub double_click_toast_ms: u64,

    /// Minimum horizontal travel for a swipe
    pub swipe_threshold_px: f64,
}

/// Dropdown configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    /// Height assumed for menus that have not been laid out yet
    pub fallback_menu_height: f64,
}

/// General application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: 300,
            boost_speed: 2.0,
            seek_step_secs: 10.0,
            volume_step: 0.1,
            shortcut_toast_ms: 800,
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
        }
    }
}

impl Default for GesturesConfig {
    fn default() -> Self {
        Self {
            double_click_window_ms: 300,
            double_click_toast_ms: 1500,
            swipe_threshold_px: 50.0,
        }
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            fallback_menu_height: 400.0,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ControlsConfig {
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    pub fn shortcut_toast(&self) -> Duration {
        Duration::from_millis(self.shortcut_toast_ms)
    }
}

impl ToastConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

impl GesturesConfig {
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_window_ms)
    }

    pub fn double_click_toast(&self) -> Duration {
        Duration::from_millis(self.double_click_toast_ms)
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/watchpage/config.toml on Linux)
    /// 3. User config file (~/.config/watchpage/config.toml on Linux)
    /// 4. Environment variables (WATCHPAGE_* prefix)
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Same as [`Config::load`], with an extra file applied after the user file
    pub fn load_with(extra: Option<&Path>) -> Result<Self> {
        let mut layers: Vec<PathBuf> = [Self::system_config_path(), Self::user_config_path()]
            .into_iter()
            .flatten()
            .filter(|path| path.exists())
            .collect();
        layers.extend(extra.map(Path::to_path_buf));

        let mut config = Self::from_files(&layers)?;
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| WatchPageError::Config("Cannot determine user config path".to_string()))?;
        self.save_to(&path)
    }

    /// Save configuration as pretty TOML at the given path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WatchPageError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| WatchPageError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml)
            .map_err(|e| WatchPageError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Read a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_files(&[path])
    }

    /// Layer TOML files in order. A key set in a later file wins; keys it
    /// leaves out fall through to earlier files, then to the defaults.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = toml::Table::new();
        for path in paths {
            let contents = std::fs::read_to_string(path.as_ref()).config_err("Failed to read config file")?;
            let layer: toml::Table = contents.parse().config_err("Failed to parse config file")?;
            merge_tables(&mut merged, layer);
        }

        toml::Value::Table(merged).try_into().config_err("Failed to parse config file")
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(ms) = std::env::var("WATCHPAGE_HOLD_THRESHOLD_MS") {
            self.controls.hold_threshold_ms = ms.parse()
                .map_err(|_| WatchPageError::Config("Invalid WATCHPAGE_HOLD_THRESHOLD_MS".to_string()))?;
        }

        if let Ok(speed) = std::env::var("WATCHPAGE_BOOST_SPEED") {
            self.controls.boost_speed = speed.parse()
                .map_err(|_| WatchPageError::Config("Invalid WATCHPAGE_BOOST_SPEED".to_string()))?;
        }

        if let Ok(ms) = std::env::var("WATCHPAGE_TOAST_DURATION_MS") {
            self.toast.default_duration_ms = ms.parse()
                .map_err(|_| WatchPageError::Config("Invalid WATCHPAGE_TOAST_DURATION_MS".to_string()))?;
        }

        if let Ok(log_level) = std::env::var("WATCHPAGE_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.controls.hold_threshold_ms == 0 {
            return Err(WatchPageError::Config("Hold threshold must be non-zero".to_string()));
        }

        if !(self.controls.boost_speed > 0.0 && self.controls.boost_speed <= 16.0) {
            return Err(WatchPageError::Config("Boost speed must be in (0, 16]".to_string()));
        }

        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            return Err(WatchPageError::Config("Volume step must be in (0, 1]".to_string()));
        }

        if self.toast.default_duration_ms == 0 {
            return Err(WatchPageError::Config("Toast duration must be non-zero".to_string()));
        }

        if !(self.dropdown.fallback_menu_height > 0.0) {
            return Err(WatchPageError::Config("Fallback menu height must be positive".to_string()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(WatchPageError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level,
                valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/watchpage/config.toml"));

        #[cfg(target_os = "windows")]
        return std::env::var("PROGRAMDATA").ok()
            .map(|p| PathBuf::from(p).join("watchpage").join("config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from("/Library/Application Support/watchpage/config.toml"));

        #[allow(unreachable_code)]
        None
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("watchpage").join("config.toml"))
    }
}

/// Deep-merge `overlay` into `base`; nested tables merge key by key
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
