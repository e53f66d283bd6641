//! Progress throttling.
//!
//! Rate-limits rendered updates so a chatty engine does not flood the terminal.

use std::time::{Duration, Instant};

use mediagrab_core::DEFAULT_THROTTLE_MS;

/// Rate-limiter for progress updates.
///
/// A zero interval lets every update through.
#[derive(Debug)]
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    /// Create a throttle from the `throttle_ms` setting.
    pub const fn from_millis(ms: u64) -> Self {
        Self {
            last_emit: None,
            min_interval: Duration::from_millis(ms),
        }
    }

    /// Whether throttling is switched off.
    pub const fn is_disabled(&self) -> bool {
        self.min_interval.is_zero()
    }

    /// Whether an update may be shown now. Records the emit time when it may.
    pub fn should_emit(&mut self) -> bool {
        self.should_emit_at(Instant::now())
    }

    fn should_emit_at(&mut self, now: Instant) -> bool {
        if self.is_disabled() {
            return true;
        }
        let due = self
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= self.min_interval);
        if due {
            self.last_emit = Some(now);
        }
        due
    }

    /// Let the next update through regardless of timing.
    pub const fn reset(&mut self) {
        self.last_emit = None;
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::from_millis(DEFAULT_THROTTLE_MS)
    }
}
