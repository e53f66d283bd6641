//! Parse command handler.
//!
//! Applies one engine output line to a fresh hook. Handy for checking what a
//! given engine line does to the displayed progress.

use std::io::{self, Write};

use mediagrab_core::{ProgressHook, ProgressSnapshot, parse_line};

use crate::error::CliError;

/// Apply `line` to a fresh hook and return the resulting snapshot.
pub fn snapshot_for_line(line: &str) -> Result<ProgressSnapshot, CliError> {
    let event = parse_line(line)?
        .ok_or_else(|| CliError::Arguments("line is not a progress event".to_string()))?;

    let mut hook = ProgressHook::new();
    hook.update(&event);
    Ok(hook.snapshot())
}

/// Execute the parse command, printing the snapshot as JSON.
pub fn execute(line: &str) -> Result<(), CliError> {
    write_snapshot(&mut io::stdout(), line)
}

fn write_snapshot(out: &mut impl Write, line: &str) -> Result<(), CliError> {
    let snapshot = snapshot_for_line(line)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    Ok(())
}
