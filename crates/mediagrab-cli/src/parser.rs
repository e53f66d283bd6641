//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for watching download-engine progress.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "mediagrab")]
#[command(about = "Track and display media download progress")]
#[command(version)]
pub struct Cli {
    /// Monitor settings file (JSON)
    #[arg(long = "settings", env = "MEDIAGRAB_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
