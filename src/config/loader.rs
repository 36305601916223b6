//! Configuration file loading with precedence handling.

use super::{EventLength, GridConfig};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub(crate) const DEFAULT_PIXELS_PER_MINUTE: f64 = 1.0;
pub(crate) const DEFAULT_TOP_INSET_MARGIN: f64 = 20.0;
pub(crate) const DEFAULT_ALL_DAY_ROW_HEIGHT: f64 = 24.0;
pub(crate) const DEFAULT_ALL_DAY_HEADER_INSET: f64 = 8.0;
pub(crate) const DEFAULT_HOUR: u32 = 8;
pub(crate) const DEFAULT_CREATED_EVENT_TEXT: &str = "Available";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "DAYGRID_CONFIG";

/// Environment variable overriding the grid density.
pub const PIXELS_PER_MINUTE_ENV: &str = "DAYGRID_PIXELS_PER_MINUTE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed fine but is outside its accepted range.
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue {
        /// Config key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/daygrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Grid density.
    #[serde(default)]
    pub pixels_per_minute: Option<f64>,

    /// Offset of 00:00 from the top of the grid.
    #[serde(default)]
    pub top_inset_margin: Option<f64>,

    /// Length of tap-created events in minutes (30 or 60).
    #[serde(default)]
    pub default_event_length: Option<u32>,

    /// Height of one all-day row.
    #[serde(default)]
    pub all_day_row_height: Option<f64>,

    /// Fixed padding added to the all-day strip.
    #[serde(default)]
    pub all_day_header_inset: Option<f64>,

    /// Hour scrolled to the top on reset.
    #[serde(default)]
    pub default_hour: Option<u32>,

    /// Title for tap-created events.
    #[serde(default)]
    pub created_event_text: Option<String>,

    /// Merge overlapping timed events before layout.
    #[serde(default)]
    pub merge_events: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
/// Values are not range-checked until [`ResolvedConfig::grid_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Grid density.
    pub pixels_per_minute: f64,
    /// Offset of 00:00.
    pub top_inset_margin: f64,
    /// Tap-created event length in minutes.
    pub default_event_length: u32,
    /// All-day row height.
    pub all_day_row_height: f64,
    /// All-day strip padding.
    pub all_day_header_inset: f64,
    /// Hour shown at the top on reset.
    pub default_hour: u32,
    /// Title for tap-created events.
    pub created_event_text: String,
    /// Merge overlapping timed events before layout.
    pub merge_events: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            pixels_per_minute: DEFAULT_PIXELS_PER_MINUTE,
            top_inset_margin: DEFAULT_TOP_INSET_MARGIN,
            default_event_length: EventLength::default().minutes(),
            all_day_row_height: DEFAULT_ALL_DAY_ROW_HEIGHT,
            all_day_header_inset: DEFAULT_ALL_DAY_HEADER_INSET,
            default_hour: DEFAULT_HOUR,
            created_event_text: DEFAULT_CREATED_EVENT_TEXT.to_string(),
            merge_events: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validate the layout-related values into a [`GridConfig`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a non-positive or non-finite
    /// density, negative or non-finite sizes, an event length other than
    /// 30/60, or an hour past 23.
    pub fn grid_config(&self) -> Result<GridConfig, ConfigError> {
        if !self.pixels_per_minute.is_finite() || self.pixels_per_minute <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "pixels_per_minute",
                reason: format!("must be a positive number, got {}", self.pixels_per_minute),
            });
        }

        let non_negative = |key: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("must be zero or positive, got {}", value),
                })
            }
        };

        let default_event_length = EventLength::from_minutes(self.default_event_length)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "default_event_length",
                reason: format!("must be 30 or 60, got {}", self.default_event_length),
            })?;

        if self.default_hour > 23 {
            return Err(ConfigError::InvalidValue {
                key: "default_hour",
                reason: format!("must be between 0 and 23, got {}", self.default_hour),
            });
        }

        Ok(GridConfig {
            pixels_per_minute: self.pixels_per_minute,
            top_inset_margin: non_negative("top_inset_margin", self.top_inset_margin)?,
            default_event_length,
            all_day_row_height: non_negative("all_day_row_height", self.all_day_row_height)?,
            all_day_header_inset: non_negative("all_day_header_inset", self.all_day_header_inset)?,
            default_hour: self.default_hour,
            created_event_text: self.created_event_text.clone(),
        })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/daygrid/daygrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("daygrid").join("daygrid.log")
    } else {
        PathBuf::from("daygrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/daygrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("daygrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DAYGRID_CONFIG` environment variable
/// 3. Default path `~/.config/daygrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        pixels_per_minute: config.pixels_per_minute.unwrap_or(defaults.pixels_per_minute),
        top_inset_margin: config.top_inset_margin.unwrap_or(defaults.top_inset_margin),
        default_event_length: config
            .default_event_length
            .unwrap_or(defaults.default_event_length),
        all_day_row_height: config
            .all_day_row_height
            .unwrap_or(defaults.all_day_row_height),
        all_day_header_inset: config
            .all_day_header_inset
            .unwrap_or(defaults.all_day_header_inset),
        default_hour: config.default_hour.unwrap_or(defaults.default_hour),
        created_event_text: config
            .created_event_text
            .unwrap_or(defaults.created_event_text),
        merge_events: config.merge_events.unwrap_or(defaults.merge_events),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DAYGRID_PIXELS_PER_MINUTE`: Override grid density
///
/// An unparseable value is ignored with a warning; range checks happen in
/// [`ResolvedConfig::grid_config`].
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(PIXELS_PER_MINUTE_ENV) {
        match raw.trim().parse::<f64>() {
            Ok(value) => config.pixels_per_minute = value,
            Err(_) => tracing::warn!(
                value = %raw,
                "Ignoring unparseable {}", PIXELS_PER_MINUTE_ENV
            ),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    pixels_per_minute_override: Option<f64>,
    merge_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(pixels_per_minute) = pixels_per_minute_override {
        config.pixels_per_minute = pixels_per_minute;
    }

    if let Some(merge) = merge_override {
        config.merge_events = merge;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_daygrid_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("daygrid.log"),
            "Default log path should end with 'daygrid.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(
            resolved.log_file_path,
            default_log_path(),
            "Missing log_file_path in config should use default"
        );
    }
}
