#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]

// Re-export core types for convenience
pub use mediagrab_core::{
    DownloadState, EngineStatus, MonitorSettings, ProgressEvent, ProgressHook, ProgressSnapshot,
};

// Internal modules (pub(crate) to keep implementation private)
pub(crate) mod progress;

// Re-export progress filtering for consumers (adapters)
pub use progress::{ProgressMonitor, ProgressThrottle, ProgressUpdate};

// Engine output bridge
mod bridge;
pub use bridge::{BridgeError, BridgeOutcome, EventBridge};

// Terminal rendering
pub mod render;
pub use render::CliProgressPrinter;
