#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod download;
pub mod settings;

// Re-export commonly used types for convenience
pub use download::{
    DownloadState, EngineStatus, PROGRESS_LINE_TAG, ProgressEvent, ProgressHook,
    ProgressSnapshot, ProtocolError, format_bytes, format_eta, format_speed, parse_line,
};
pub use settings::{
    DEFAULT_THROTTLE_MS, MonitorSettings, SettingsError, SettingsUpdate, load_settings_file,
    validate_settings,
};
