//! Download progress domain types.
//!
//! Pure data types for recording and presenting engine progress. No I/O,
//! networking, or runtime dependencies allowed.
//!
//! # Structure
//!
//! - `event` - Engine progress events and line parsing (`ProgressEvent`, `EngineStatus`)
//! - `hook` - The progress record the engine updates (`ProgressHook`, `ProgressSnapshot`)
//! - `state` - Host-side lifecycle (`DownloadState`)
//! - `format` - Display formatting for bytes, rates and ETAs

pub mod event;
pub mod format;
pub mod hook;
pub mod state;

// Re-export commonly used types
pub use event::{EngineStatus, PROGRESS_LINE_TAG, ProgressEvent, ProtocolError, parse_line};
pub use format::{format_bytes, format_eta, format_speed};
pub use hook::{ProgressHook, ProgressSnapshot};
pub use state::DownloadState;
