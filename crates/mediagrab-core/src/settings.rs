//! Monitor settings types and validation.
//!
//! Settings control how the host filters and renders progress. They are pure
//! domain types; the only I/O is [`load_settings_file`].

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default minimum interval between rendered progress updates.
pub const DEFAULT_THROTTLE_MS: u64 = 100;

/// Monitor settings structure.
///
/// All fields are optional to support partial files and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MonitorSettings {
    /// Minimum milliseconds between rendered updates (0 disables throttling).
    pub throttle_ms: Option<u64>,

    /// Never show a lower percentage than one already shown.
    pub monotonic: Option<bool>,

    /// Force line-based output even on a terminal.
    pub plain_output: Option<bool>,
}

impl MonitorSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            throttle_ms: Some(DEFAULT_THROTTLE_MS),
            monotonic: Some(true),
            plain_output: Some(false),
        }
    }

    /// Get the effective throttle interval (with default fallback).
    #[must_use]
    pub const fn effective_throttle_ms(&self) -> u64 {
        match self.throttle_ms {
            Some(ms) => ms,
            None => DEFAULT_THROTTLE_MS,
        }
    }

    /// Whether monotonic progress is enabled (default true).
    #[must_use]
    pub const fn effective_monotonic(&self) -> bool {
        match self.monotonic {
            Some(value) => value,
            None => true,
        }
    }

    /// Whether plain output is forced (default false).
    #[must_use]
    pub const fn effective_plain_output(&self) -> bool {
        match self.plain_output {
            Some(value) => value,
            None => false,
        }
    }

    /// Merge an update into these settings, only touching fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ms) = other.throttle_ms {
            self.throttle_ms = ms;
        }
        if let Some(value) = other.monotonic {
            self.monotonic = value;
        }
        if let Some(value) = other.plain_output {
            self.plain_output = value;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub throttle_ms: Option<Option<u64>>,
    pub monotonic: Option<Option<bool>>,
    pub plain_output: Option<Option<bool>>,
}

/// Settings loading and validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Throttle interval must be at most 10,000 ms, got {0}")]
    InvalidThrottle(u64),

    #[error("Failed to read settings file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse settings file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &MonitorSettings) -> Result<(), SettingsError> {
    if let Some(ms) = settings.throttle_ms {
        if ms > 10_000 {
            return Err(SettingsError::InvalidThrottle(ms));
        }
    }

    Ok(())
}

/// Load and validate settings from a JSON file.
pub fn load_settings_file(path: &Path) -> Result<MonitorSettings, SettingsError> {
    let shown = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
        path: shown.clone(),
        message: e.to_string(),
    })?;

    let settings: MonitorSettings =
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse {
            path: shown.clone(),
            message: e.to_string(),
        })?;

    validate_settings(&settings)?;
    tracing::debug!(path = %shown, ?settings, "loaded monitor settings");
    Ok(settings)
}
