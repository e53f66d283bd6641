//! Watch command handler.
//!
//! Streams engine output through the event bridge and renders updates.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use mediagrab_core::{
    DownloadState, MonitorSettings, SettingsUpdate, format_bytes, validate_settings,
};
use mediagrab_download::{BridgeOutcome, CliProgressPrinter, EventBridge, ProgressUpdate};
use tokio::io::{AsyncBufRead, BufReader};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Arguments for the watch command.
#[derive(Debug, Clone, Default)]
pub struct WatchArgs {
    pub input: Option<PathBuf>,
    pub throttle_ms: Option<u64>,
    pub no_monotonic: bool,
    pub plain: bool,
    pub json: bool,
}

impl WatchArgs {
    /// Flags that override the settings file. Unset flags leave it alone.
    fn settings_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            throttle_ms: self.throttle_ms.map(Some),
            monotonic: self.no_monotonic.then_some(Some(false)),
            plain_output: self.plain.then_some(Some(true)),
        }
    }
}

/// Combine file settings with command-line overrides.
pub fn effective_settings(
    base: &MonitorSettings,
    args: &WatchArgs,
) -> Result<MonitorSettings, CliError> {
    let mut settings = base.clone();
    settings.merge(&args.settings_update());
    validate_settings(&settings)?;
    Ok(settings)
}

/// Execute the watch command.
pub async fn execute(ctx: &CliContext, args: WatchArgs) -> Result<(), CliError> {
    let settings = effective_settings(&ctx.settings, &args)?;
    tracing::debug!(?settings, input = ?args.input, "starting watch");

    let outcome = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await.map_err(|e| {
                CliError::Io(format!("cannot open {}: {e}", path.display()))
            })?;
            watch(BufReader::new(file), &settings, args.json).await?
        }
        None => watch(BufReader::new(tokio::io::stdin()), &settings, args.json).await?,
    };

    if outcome.events == 0 {
        tracing::warn!(
            skipped_lines = outcome.skipped_lines,
            "no progress events in engine output"
        );
        eprintln!("No progress events seen. Was the engine run with --progress-template?");
        return Ok(());
    }

    if !args.json {
        if let Some(update) = &outcome.final_update {
            writeln!(io::stdout(), "{}", summary(update))?;
        }
    }
    Ok(())
}

async fn watch<R>(
    reader: R,
    settings: &MonitorSettings,
    json: bool,
) -> Result<BridgeOutcome, CliError>
where
    R: AsyncBufRead + Unpin,
{
    if json {
        return watch_json(reader, settings, &mut io::stdout()).await;
    }

    let plain = settings.effective_plain_output() || !io::stdout().is_terminal();
    let mut printer = CliProgressPrinter::with_plain(plain);
    let mut write_error = None;
    let result = EventBridge::new(settings)
        .run(reader, |update| {
            if write_error.is_none() {
                write_error = printer.update(update).err();
            }
        })
        .await;
    printer.finish();

    let outcome = result?;
    match write_error {
        Some(e) => Err(e.into()),
        None => Ok(outcome),
    }
}

/// Print each update to `out` as one JSON line.
///
/// After the first failed write nothing more is written, and the failure is
/// returned once the input is drained.
async fn watch_json<R, W>(
    reader: R,
    settings: &MonitorSettings,
    out: &mut W,
) -> Result<BridgeOutcome, CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut write_error = None;
    let outcome = EventBridge::new(settings)
        .run(reader, |update| {
            if write_error.is_none() {
                write_error = write_json_line(&mut *out, update).err();
            }
        })
        .await?;

    match write_error {
        Some(e) => Err(e),
        None => Ok(outcome),
    }
}

fn write_json_line(out: &mut impl Write, update: &ProgressUpdate) -> Result<(), CliError> {
    let line = serde_json::to_string(update)?;
    writeln!(out, "{line}")?;
    Ok(())
}

/// Closing line printed after the bar is cleared.
pub fn summary(update: &ProgressUpdate) -> String {
    let name = if update.filename.is_empty() {
        "download"
    } else {
        update.filename.as_str()
    };

    match update.state {
        DownloadState::Completed => {
            format!("✓ {name} ({})", format_bytes(update.downloaded))
        }
        state => format!(
            "✗ {name}: {state} at {:.1}% ({})",
            update.progress,
            format_bytes(update.downloaded)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(state: DownloadState, filename: &str) -> ProgressUpdate {
        ProgressUpdate {
            progress: 42.0,
            downloaded: 3 * 1024 * 1024,
            total: Some(10 * 1024 * 1024),
            speed: None,
            eta: None,
            filename: filename.to_string(),
            state,
        }
    }

    #[test]
    fn test_flags_override_settings() {
        let args = WatchArgs {
            throttle_ms: Some(0),
            no_monotonic: true,
            ..WatchArgs::default()
        };
        let settings = effective_settings(&MonitorSettings::with_defaults(), &args).unwrap();

        assert_eq!(settings.effective_throttle_ms(), 0);
        assert!(!settings.effective_monotonic());
        assert!(!settings.effective_plain_output());
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let base = MonitorSettings {
            throttle_ms: Some(750),
            monotonic: Some(false),
            plain_output: Some(true),
        };
        let settings = effective_settings(&base, &WatchArgs::default()).unwrap();

        assert_eq!(settings, base);
    }

    #[test]
    fn test_invalid_throttle_flag_is_config_error() {
        let args = WatchArgs {
            throttle_ms: Some(1_000_000),
            ..WatchArgs::default()
        };
        let err = effective_settings(&MonitorSettings::default(), &args).unwrap_err();

        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_summary_completed() {
        let text = summary(&update(DownloadState::Completed, "clip.mp4"));
        assert_eq!(text, "✓ clip.mp4 (3.0 MB)");
    }

    #[test]
    fn test_summary_failed() {
        let text = summary(&update(DownloadState::Failed, ""));
        assert_eq!(text, "✗ download: Failed at 42.0% (3.0 MB)");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn unthrottled() -> MonitorSettings {
        MonitorSettings {
            throttle_ms: Some(0),
            ..MonitorSettings::with_defaults()
        }
    }

    const ENGINE_LOG: &str = "download:{\"downloaded_bytes\": 5, \"total_bytes\": 10}\ndownload:{\"status\": \"finished\"}\n";

    #[tokio::test]
    async fn test_watch_json_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.log");
        std::fs::write(&path, ENGINE_LOG).unwrap();

        let file = tokio::fs::File::open(&path).await.unwrap();
        let mut out = Vec::new();
        let outcome = watch_json(BufReader::new(file), &unthrottled(), &mut out)
            .await
            .unwrap();

        assert_eq!(outcome.events, 2);
        assert_eq!(
            outcome.final_update.map(|u| u.state),
            Some(DownloadState::Completed)
        );

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["progress"], 50.0);
        assert_eq!(first["state"], "downloading");
    }

    #[tokio::test]
    async fn test_watch_json_closed_pipe_is_io_error() {
        let err = watch_json(
            BufReader::new(ENGINE_LOG.as_bytes()),
            &unthrottled(),
            &mut ClosedPipe,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), 74);
    }
}
