//! CLI-specific error types and mappings.
//!
//! Maps core and bridge errors to exit codes and user-facing messages.

use mediagrab_core::{ProtocolError, SettingsError};
use mediagrab_download::BridgeError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Engine output could not be understood.
    #[error("Malformed engine output: {0}")]
    Data(String),

    /// IO error (file not found, broken pipe, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Read { .. } => Self::Io(err.to_string()),
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<ProtocolError> for CliError {
    fn from(err: ProtocolError) -> Self {
        Self::Data(err.to_string())
    }
}

impl From<BridgeError> for CliError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Protocol { .. } => Self::Data(err.to_string()),
            BridgeError::Io(io_err) => Self::Io(io_err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(err.to_string())
    }
}
