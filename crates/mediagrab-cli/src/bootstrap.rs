//! CLI bootstrap - the composition root.
//!
//! Resolves settings and installs logging before any command runs.

use std::path::Path;

use mediagrab_core::{MonitorSettings, load_settings_file};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Application context handed to command handlers.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Monitor settings from the settings file, or defaults.
    pub settings: MonitorSettings,
}

/// Build the CLI context.
///
/// Without a settings path the defaults are used. A path that cannot be read
/// or parsed is an error rather than a silent fallback.
pub fn bootstrap(settings_path: Option<&Path>) -> Result<CliContext, CliError> {
    let settings = match settings_path {
        Some(path) => load_settings_file(path)?,
        None => {
            tracing::debug!("no settings file given, using defaults");
            MonitorSettings::with_defaults()
        }
    };
    Ok(CliContext { settings })
}

/// Install the tracing subscriber.
///
/// Logs go to stderr so stdout stays usable for `--json` output. `RUST_LOG`
/// wins over the verbosity flag.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
