//! The progress hook: a record of the latest engine-reported progress.
//!
//! The engine calls [`ProgressHook::update`] once per event; the host reads
//! the fields back at its own cadence. The hook never fails: missing values
//! are defaulted when the event is read.

use serde::{Deserialize, Serialize};

use super::event::{EngineStatus, ProgressEvent};

/// Latest progress reported by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressHook {
    progress: f64,
    downloaded: u64,
    total: u64,
    speed: u64,
    status: EngineStatus,
    filename: String,
}

/// Point-in-time copy of every field of a [`ProgressHook`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Percentage complete, 0-100 for well-formed input.
    pub progress: f64,
    /// Bytes downloaded.
    pub downloaded: u64,
    /// Total bytes, 0 when unknown.
    pub total: u64,
    /// Bytes per second.
    pub speed: u64,
    /// Engine status, verbatim.
    pub status: EngineStatus,
    /// Last known target file.
    pub filename: String,
}

impl ProgressHook {
    /// Create a hook with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one engine event.
    ///
    /// Status and filename are always replaced. Byte counts and speed only
    /// change on `downloading` events; a `finished` event pins progress to
    /// 100. Other statuses leave the numeric fields as they were.
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, event: &ProgressEvent) {
        self.status = event.status();
        self.filename = event.filename().to_string();

        match self.status {
            EngineStatus::Downloading => {
                self.downloaded = event.downloaded_bytes();
                self.total = event.total_bytes();
                self.speed = event.speed();

                self.progress = if self.total > 0 {
                    (self.downloaded as f64 / self.total as f64) * 100.0
                } else {
                    0.0
                };
            }
            EngineStatus::Finished => {
                self.progress = 100.0;
            }
            EngineStatus::Other(_) => {}
        }

        tracing::trace!(
            status = %self.status,
            progress = self.progress,
            downloaded = self.downloaded,
            total = self.total,
            "progress hook updated"
        );
    }

    /// Percentage complete.
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Bytes downloaded.
    pub const fn downloaded(&self) -> u64 {
        self.downloaded
    }

    /// Total bytes (0 when unknown).
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Transfer rate in bytes per second.
    pub const fn speed(&self) -> u64 {
        self.speed
    }

    /// Current engine status.
    pub const fn status(&self) -> &EngineStatus {
        &self.status
    }

    /// Last known target file path.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Copy all fields at once.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            progress: self.progress,
            downloaded: self.downloaded,
            total: self.total,
            speed: self.speed,
            status: self.status.clone(),
            filename: self.filename.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hook_defaults() {
        let hook = ProgressHook::new();

        assert!(hook.progress().abs() < f64::EPSILON);
        assert_eq!(hook.downloaded(), 0);
        assert_eq!(hook.total(), 0);
        assert_eq!(hook.speed(), 0);
        assert_eq!(hook.status(), &EngineStatus::Downloading);
        assert_eq!(hook.filename(), "");
    }

    #[test]
    fn test_downloading_computes_percentage() {
        let mut hook = ProgressHook::new();
        hook.update(&ProgressEvent::downloading(50, 200));

        assert_eq!(hook.progress(), 25.0);
        assert_eq!(hook.downloaded(), 50);
        assert_eq!(hook.total(), 200);
    }

    #[test]
    fn test_percentage_matches_division_exactly() {
        let mut hook = ProgressHook::new();
        hook.update(&ProgressEvent::downloading(1, 3));

        assert_eq!(hook.progress(), (1.0 / 3.0) * 100.0);
    }

    #[test]
    fn test_unknown_total_resets_progress() {
        let mut hook = ProgressHook::new();
        hook.update(&ProgressEvent::downloading(50, 100));
        assert_eq!(hook.progress(), 50.0);

        hook.update(&ProgressEvent::downloading(80, 0));
        assert_eq!(hook.progress(), 0.0);
        assert_eq!(hook.downloaded(), 80);
        assert_eq!(hook.total(), 0);
    }

    #[test]
    fn test_finished_keeps_byte_counts() {
        let mut hook = ProgressHook::new();
        hook.update(&ProgressEvent::downloading(90, 100).with_speed(4096));
        hook.update(&ProgressEvent::finished("video.mp4"));

        assert_eq!(hook.progress(), 100.0);
        assert_eq!(hook.downloaded(), 90);
        assert_eq!(hook.total(), 100);
        assert_eq!(hook.speed(), 4096);
        assert_eq!(hook.filename(), "video.mp4");
    }

    #[test]
    fn test_other_status_keeps_numbers() {
        let mut hook = ProgressHook::new();
        hook.update(&ProgressEvent::downloading(30, 60).with_filename("a.mp4"));
        hook.update(
            &ProgressEvent::downloading(0, 0).with_status(EngineStatus::Other("error".into())),
        );

        assert_eq!(hook.status().as_str(), "error");
        assert_eq!(hook.filename(), "");
        assert_eq!(hook.progress(), 50.0);
        assert_eq!(hook.downloaded(), 30);
        assert_eq!(hook.total(), 60);
    }

    #[test]
    fn test_restart_after_finished() {
        let mut hook = ProgressHook::new();
        hook.update(&ProgressEvent::finished("video.f137.mp4"));
        hook.update(&ProgressEvent::downloading(10, 40).with_filename("video.f140.m4a"));

        assert_eq!(hook.status(), &EngineStatus::Downloading);
        assert_eq!(hook.progress(), 25.0);
        assert_eq!(hook.filename(), "video.f140.m4a");
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let mut hook = ProgressHook::new();
        hook.update(
            &ProgressEvent::downloading(512, 1024)
                .with_speed(256)
                .with_filename("song.m4a"),
        );

        let snapshot = hook.snapshot();
        assert_eq!(snapshot.progress, 50.0);
        assert_eq!(snapshot.downloaded, 512);
        assert_eq!(snapshot.total, 1024);
        assert_eq!(snapshot.speed, 256);
        assert_eq!(snapshot.status, EngineStatus::Downloading);
        assert_eq!(snapshot.filename, "song.m4a");
    }
}
