//! Progress events emitted by the download engine.
//!
//! The engine (yt-dlp) calls its progress hooks with a loosely-typed mapping.
//! When run as a subprocess with
//! `--progress-template "download:%(progress)j"` the same mapping is printed
//! as one JSON object per line:
//!
//! ```json
//! {"status": "downloading", "filename": "a.mp4", "downloaded_bytes": 1024, "total_bytes": 4096, "speed": 512.5}
//! {"status": "downloading", "downloaded_bytes": 10, "total_bytes_estimate": 100.0}
//! {"status": "finished", "filename": "a.mp4"}
//! ```
//!
//! Every key is optional. Missing and `null` values are defaulted by the
//! accessors on [`ProgressEvent`]; only malformed JSON or a non-numeric value
//! in a numeric key is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

/// Tag that yt-dlp's progress template puts in front of each progress line.
pub const PROGRESS_LINE_TAG: &str = "download:";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when parsing engine output.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

// ============================================================================
// Engine Status
// ============================================================================

/// Coarse phase reported by the engine.
///
/// Values other than `downloading` and `finished` are passed through verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EngineStatus {
    /// Bytes are being transferred.
    #[default]
    Downloading,
    /// The engine finished writing the file.
    Finished,
    /// Any engine-specific status (e.g. `"error"`), kept as reported.
    Other(String),
}

impl EngineStatus {
    /// The status string exactly as the engine reports it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Downloading => "downloading",
            Self::Finished => "finished",
            Self::Other(raw) => raw,
        }
    }

    /// Parse an engine status string. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "downloading" => Self::Downloading,
            "finished" => Self::Finished,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EngineStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "downloading" => Self::Downloading,
            "finished" => Self::Finished,
            _ => Self::Other(s),
        }
    }
}

impl From<EngineStatus> for String {
    fn from(status: EngineStatus) -> Self {
        match status {
            EngineStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Progress Event
// ============================================================================

/// A single progress notification from the engine.
///
/// Fields keep the engine's raw values; the accessors apply the defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<EngineStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    downloaded_bytes: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_bytes: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_bytes_estimate: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eta: Option<Number>,
}

impl ProgressEvent {
    /// A `downloading` event with exact byte counts.
    #[must_use]
    pub fn downloading(downloaded: u64, total: u64) -> Self {
        Self {
            status: Some(EngineStatus::Downloading),
            downloaded_bytes: Some(downloaded.into()),
            total_bytes: Some(total.into()),
            ..Self::default()
        }
    }

    /// A `finished` event for the given file.
    #[must_use]
    pub fn finished(filename: impl Into<String>) -> Self {
        Self {
            status: Some(EngineStatus::Finished),
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    /// Set the status key.
    #[must_use]
    pub fn with_status(mut self, status: EngineStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the filename key.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the estimated total, used when the exact total is unknown.
    #[must_use]
    pub fn with_total_estimate(mut self, estimate: u64) -> Self {
        self.total_bytes_estimate = Some(estimate.into());
        self
    }

    /// Set the transfer rate in bytes per second.
    #[must_use]
    pub fn with_speed(mut self, speed: u64) -> Self {
        self.speed = Some(speed.into());
        self
    }

    /// Set the estimated seconds remaining.
    #[must_use]
    pub fn with_eta(mut self, eta: u64) -> Self {
        self.eta = Some(eta.into());
        self
    }

    /// Parse one JSON object as emitted by the engine.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reported status, `downloading` when absent.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status.clone().unwrap_or_default()
    }

    /// Target file path, empty when absent.
    #[must_use]
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or_default()
    }

    /// Bytes written so far, 0 when absent.
    #[must_use]
    pub fn downloaded_bytes(&self) -> u64 {
        self.downloaded_bytes.as_ref().map_or(0, number_to_u64)
    }

    /// Total size in bytes.
    ///
    /// Uses `total_bytes` when it is present and non-zero, otherwise falls
    /// back to `total_bytes_estimate`, otherwise 0. The choice is made on the
    /// reported value, so a negative total is kept (and coerced to 0) rather
    /// than replaced by the estimate.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
            .as_ref()
            .filter(|&total| !is_zero(total))
            .or(self.total_bytes_estimate.as_ref())
            .map_or(0, number_to_u64)
    }

    /// Transfer rate truncated to whole bytes per second, 0 when absent.
    #[must_use]
    pub fn speed(&self) -> u64 {
        self.speed.as_ref().map_or(0, number_to_u64)
    }

    /// Estimated seconds remaining, if the engine reported one.
    #[must_use]
    pub fn eta(&self) -> Option<u64> {
        self.eta.as_ref().map(number_to_u64)
    }
}

/// Whether a JSON number is zero, integer or float.
fn is_zero(n: &Number) -> bool {
    n.as_f64().is_some_and(|v| v == 0.0)
}

/// Coerce a JSON number to a byte count.
///
/// Floats are truncated; negative and non-finite values become 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn number_to_u64(n: &Number) -> u64 {
    if let Some(v) = n.as_u64() {
        return v;
    }
    match n.as_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v as u64,
        _ => 0,
    }
}

// ============================================================================
// Line Parsing
// ============================================================================

/// Parse one line of engine output.
///
/// Strips the [`PROGRESS_LINE_TAG`] if present. Blank lines and lines that
/// are not JSON objects (log chatter such as `[youtube] Extracting URL`)
/// yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ProgressEvent>, ProtocolError> {
    let line = line.trim();
    let payload = line.strip_prefix(PROGRESS_LINE_TAG).unwrap_or(line).trim_start();

    if !payload.starts_with('{') {
        return Ok(None);
    }

    ProgressEvent::from_json(payload).map(Some)
}

// ============================================================================
// Tests
// ============================================================================
