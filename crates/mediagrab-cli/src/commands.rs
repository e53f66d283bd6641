//! Subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch engine output and render download progress
    Watch {
        /// Read engine output from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Minimum milliseconds between rendered updates (0 = every update)
        #[arg(long)]
        throttle_ms: Option<u64>,
        /// Show raw engine progress even when it moves backwards
        #[arg(long)]
        no_monotonic: bool,
        /// Print one line per update instead of a progress bar
        #[arg(long)]
        plain: bool,
        /// Print each update as a JSON line
        #[arg(long, conflicts_with = "plain")]
        json: bool,
    },

    /// Apply a single engine output line and print the resulting progress
    Parse {
        /// One line of engine output, e.g. 'download:{"status": "finished"}'
        line: String,
    },
}
