//! Host-side download lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::EngineStatus;

/// Lifecycle of a download as shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    /// Waiting to start.
    Queued,
    /// Resolving media information before the transfer.
    FetchingInfo,
    /// Bytes are being transferred.
    Downloading,
    /// Transfer done, post-processing (merge, remux) may still run.
    Processing,
    /// Completed successfully.
    Completed,
    /// Failed with an error.
    Failed,
    /// Cancelled by the user.
    Cancelled,
    /// Paused by the user.
    Paused,
}

impl DownloadState {
    /// Human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::FetchingInfo => "Fetching info",
            Self::Downloading => "Downloading",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Paused => "Paused",
        }
    }

    /// Whether work is currently happening for this download.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Downloading | Self::Processing | Self::FetchingInfo)
    }

    /// Whether the download reached a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Map an engine status onto the lifecycle.
    ///
    /// `finished` only means one file was written; the engine may still merge
    /// or convert it, so it maps to `Processing` rather than `Completed`.
    #[must_use]
    pub fn from_engine(status: &EngineStatus) -> Self {
        match status {
            EngineStatus::Downloading => Self::Downloading,
            EngineStatus::Finished => Self::Processing,
            EngineStatus::Other(raw) if raw == "error" => Self::Failed,
            EngineStatus::Other(_) => Self::Processing,
        }
    }
}

impl fmt::Display for DownloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
