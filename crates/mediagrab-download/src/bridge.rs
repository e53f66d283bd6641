//! Engine output bridge.
//!
//! Reads the engine's output line by line, feeds progress events into a
//! [`ProgressHook`], and hands the resulting display updates to a sink.
//!
//! ```text
//! engine stdout ──► parse_line ──► ProgressHook::update ──► ProgressMonitor::poll
//!                                                                │
//!                                          sink ◄── ProgressThrottle
//! ```

use mediagrab_core::{
    EngineStatus, MonitorSettings, ProgressHook, ProgressSnapshot, ProtocolError, parse_line,
};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::progress::{ProgressMonitor, ProgressThrottle, ProgressUpdate};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while bridging engine output.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed progress event on line {line}: {source}")]
    Protocol {
        /// 1-based line number in the engine output.
        line: u64,
        #[source]
        source: ProtocolError,
    },

    #[error("Failed to read engine output: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Outcome
// ============================================================================

/// Summary of a completed bridge run.
#[derive(Clone, Debug, PartialEq)]
pub struct BridgeOutcome {
    /// Final state of the hook.
    pub snapshot: ProgressSnapshot,
    /// Progress events applied to the hook.
    pub events: u64,
    /// Lines that were not progress events.
    pub skipped_lines: u64,
    /// The closing update, `None` if no event was ever seen.
    pub final_update: Option<ProgressUpdate>,
}

// ============================================================================
// Bridge
// ============================================================================

/// Connects engine output to the progress hook and the display.
#[derive(Debug)]
pub struct EventBridge {
    hook: ProgressHook,
    monitor: ProgressMonitor,
    throttle: ProgressThrottle,
    events: u64,
    skipped_lines: u64,
    last_status: Option<EngineStatus>,
}

impl EventBridge {
    /// Create a bridge configured from monitor settings.
    pub fn new(settings: &MonitorSettings) -> Self {
        Self {
            hook: ProgressHook::new(),
            monitor: ProgressMonitor::new(settings.effective_monotonic()),
            throttle: ProgressThrottle::from_millis(settings.effective_throttle_ms()),
            events: 0,
            skipped_lines: 0,
            last_status: None,
        }
    }

    /// The hook being updated.
    pub const fn hook(&self) -> &ProgressHook {
        &self.hook
    }

    /// Process one line of engine output.
    ///
    /// Returns the update to display, if any. Status changes bypass the
    /// throttle so phase transitions are never dropped.
    pub fn handle_line(
        &mut self,
        line_number: u64,
        line: &str,
    ) -> Result<Option<ProgressUpdate>, BridgeError> {
        let event = parse_line(line).map_err(|source| BridgeError::Protocol {
            line: line_number,
            source,
        })?;

        let Some(event) = event else {
            if !line.trim().is_empty() {
                tracing::trace!(line_number, line, "skipping non-progress line");
            }
            self.skipped_lines += 1;
            return Ok(None);
        };

        self.events += 1;
        let status = event.status();
        let status_changed = self.last_status.as_ref() != Some(&status);

        // A new file after a finished one: the engine moved on to the next
        // stream (e.g. audio after video), so start the bar over.
        if self.last_status == Some(EngineStatus::Finished) && status == EngineStatus::Downloading {
            tracing::debug!(filename = event.filename(), "download restarted");
            self.monitor.reset();
        }
        self.last_status = Some(status);

        self.hook.update(&event);
        tracing::debug!(
            line_number,
            status = %self.hook.status(),
            progress = self.hook.progress(),
            downloaded = self.hook.downloaded(),
            total = self.hook.total(),
            speed = self.hook.speed(),
            "progress event"
        );

        let Some(update) = self.monitor.poll(&self.hook.snapshot(), event.eta()) else {
            return Ok(None);
        };

        if status_changed {
            self.throttle.reset();
        }
        Ok(self.throttle.should_emit().then_some(update))
    }

    /// Read `reader` to the end, passing every visible update to `sink`.
    ///
    /// The closing update from [`ProgressMonitor::finish`] is always passed
    /// to the sink when at least one event was seen.
    pub async fn run<R, F>(mut self, reader: R, mut sink: F) -> Result<BridgeOutcome, BridgeError>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(&ProgressUpdate),
    {
        let mut lines = reader.lines();
        let mut line_number = 0_u64;

        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            if let Some(update) = self.handle_line(line_number, &line)? {
                sink(&update);
            }
        }

        let final_update = self.monitor.finish();
        if let Some(update) = &final_update {
            sink(update);
        }

        tracing::debug!(
            events = self.events,
            skipped_lines = self.skipped_lines,
            "engine output closed"
        );

        Ok(BridgeOutcome {
            snapshot: self.hook.snapshot(),
            events: self.events,
            skipped_lines: self.skipped_lines,
            final_update,
        })
    }
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new(&MonitorSettings::with_defaults())
    }
}

// ============================================================================
// Tests
// ============================================================================
