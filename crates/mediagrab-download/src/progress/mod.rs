//! Progress filtering and throttling.
//!
//! This module decides which hook snapshots become visible updates and how
//! often they may be rendered.

mod monitor;
mod throttle;

pub use monitor::{ProgressMonitor, ProgressUpdate};
pub use throttle::ProgressThrottle;
