//! Host settings
//!
//! Read from a JSON file at startup. Settings shape how the host drives the
//! game (cadence, input, logging); they never change gameplay rules.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CATCH_UP_TICKS, TICK_INTERVAL};
use crate::platform::input::{DEFAULT_HOLD_WINDOW, DEFAULT_INITIAL_HOLD_WINDOW};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "BRICK_BREAKER_SETTINGS";
/// File looked up in the working directory when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "brick_breaker.json";

/// Failure to read a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Host settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Most ticks run back to back after a stall
    pub max_catch_up_ticks: u32,
    /// Host frames a fresh press stays held before auto-repeat starts
    pub initial_hold_window_frames: u64,
    /// Host frames a repeating key stays held without another repeat
    pub hold_window_frames: u64,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL.as_millis() as u64,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
            initial_hold_window_frames: DEFAULT_INITIAL_HOLD_WINDOW,
            hold_window_frames: DEFAULT_HOLD_WINDOW,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Path the host reads settings from
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from `default_path`.
    ///
    /// A missing file is normal and yields the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval(), Duration::from_millis(16));
        assert_eq!(settings.max_catch_up_ticks, 8);
        assert_eq!(settings.initial_hold_window_frames, 32);
        assert_eq!(settings.hold_window_frames, 4);
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "tick_interval_ms": 20 }"#).unwrap();
        assert_eq!(settings.tick_interval_ms, 20);
        assert_eq!(settings.max_catch_up_ticks, 8);
        assert_eq!(settings.initial_hold_window_frames, 32);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            log_file: Some(PathBuf::from("game.log")),
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ tick_interval_ms: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from(Path::new("/nonexistent/brick_breaker.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let settings = Settings {
            tick_interval_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
    }
}
