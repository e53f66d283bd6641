//! Host-side polling of the progress hook.
//!
//! The hook mirrors whatever the engine reports, including estimates that
//! move backwards on segmented (HLS/DASH) streams. The monitor decides which
//! snapshots are worth showing and what they should say.

use mediagrab_core::{DownloadState, EngineStatus, ProgressSnapshot};
use serde::Serialize;

/// A progress update ready for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// Percentage to display.
    pub progress: f64,
    /// Bytes downloaded.
    pub downloaded: u64,
    /// Total bytes, `None` when unknown.
    pub total: Option<u64>,
    /// Bytes per second, `None` when unknown or stalled.
    pub speed: Option<u64>,
    /// Estimated seconds remaining.
    pub eta: Option<u64>,
    /// File being written.
    pub filename: String,
    /// Lifecycle state derived from the engine status.
    pub state: DownloadState,
}

/// Turns successive hook snapshots into display updates.
#[derive(Debug)]
pub struct ProgressMonitor {
    monotonic: bool,
    max_progress: f64,
    last_status: Option<EngineStatus>,
    last_emitted: Option<ProgressSnapshot>,
    last_seen: Option<ProgressSnapshot>,
}

impl ProgressMonitor {
    /// Create a monitor. In monotonic mode displayed progress never decreases.
    pub const fn new(monotonic: bool) -> Self {
        Self {
            monotonic,
            max_progress: 0.0,
            last_status: None,
            last_emitted: None,
            last_seen: None,
        }
    }

    /// Look at the current snapshot and decide whether to emit an update.
    ///
    /// A status change always emits. Otherwise, in monotonic mode an update is
    /// emitted when progress exceeds the highest value shown so far, or when
    /// the engine reports a non-zero speed (carrying the highest progress).
    /// In non-monotonic mode any change from the last emitted snapshot emits.
    pub fn poll(
        &mut self,
        snapshot: &ProgressSnapshot,
        eta: Option<u64>,
    ) -> Option<ProgressUpdate> {
        let status_changed = self.last_status.as_ref() != Some(&snapshot.status);
        self.last_status = Some(snapshot.status.clone());
        self.last_seen = Some(snapshot.clone());

        let progress = if self.monotonic {
            if snapshot.progress > self.max_progress {
                self.max_progress = snapshot.progress;
            } else if snapshot.speed == 0 && !status_changed {
                return None;
            }
            self.max_progress
        } else {
            if !status_changed && self.last_emitted.as_ref() == Some(snapshot) {
                return None;
            }
            snapshot.progress
        };

        self.last_emitted = Some(snapshot.clone());
        Some(Self::build_update(snapshot, progress, eta))
    }

    /// Produce the final update once the engine is done.
    ///
    /// Reports completion at 100%, unless the last engine status was an error,
    /// in which case the highest progress shown is kept and the state is
    /// `Failed`. Returns `None` when nothing was ever polled.
    pub fn finish(&self) -> Option<ProgressUpdate> {
        let snapshot = self.last_seen.as_ref()?;

        let update = match DownloadState::from_engine(&snapshot.status) {
            DownloadState::Failed => {
                let progress = if self.monotonic {
                    self.max_progress
                } else {
                    snapshot.progress
                };
                Self::build_update(snapshot, progress, None)
            }
            _ => ProgressUpdate {
                state: DownloadState::Completed,
                ..Self::build_update(snapshot, 100.0, None)
            },
        };
        Some(update)
    }

    /// Forget the highest progress seen, for a download that restarted.
    pub fn reset(&mut self) {
        self.max_progress = 0.0;
        self.last_emitted = None;
    }

    /// Highest progress shown so far.
    pub const fn max_progress(&self) -> f64 {
        self.max_progress
    }

    fn build_update(
        snapshot: &ProgressSnapshot,
        progress: f64,
        eta: Option<u64>,
    ) -> ProgressUpdate {
        ProgressUpdate {
            progress,
            downloaded: snapshot.downloaded,
            total: (snapshot.total > 0).then_some(snapshot.total),
            speed: (snapshot.speed > 0).then_some(snapshot.speed),
            eta,
            filename: snapshot.filename.clone(),
            state: DownloadState::from_engine(&snapshot.status),
        }
    }
}

impl Default for ProgressMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}
