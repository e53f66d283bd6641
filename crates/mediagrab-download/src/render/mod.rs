//! CLI progress rendering.
//!
//! Pure sync, presentation-only module. Draws a bar with `indicatif` on a
//! terminal and prints one line per update everywhere else.

use std::borrow::Cow;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mediagrab_core::{format_bytes, format_eta, format_speed};

use crate::progress::ProgressUpdate;

/// Bar resolution: one step per tenth of a percent.
const BAR_STEPS: u64 = 1000;

/// Longest filename label shown before truncation.
const MAX_LABEL: usize = 40;

// ============================================================================
// CLI Progress Printer
// ============================================================================

/// Progress display that selects terminal or plain output.
pub struct CliProgressPrinter {
    inner: ProgressRender,
}

enum ProgressRender {
    Fancy(FancyProgress),
    Plain(PlainProgress),
}

impl CliProgressPrinter {
    /// Create a printer, auto-detecting terminal capability.
    pub fn new() -> Self {
        Self::with_plain(!io::stdout().is_terminal())
    }

    /// Create a printer, forcing plain output when `plain` is set.
    pub fn with_plain(plain: bool) -> Self {
        let inner = if plain {
            ProgressRender::Plain(PlainProgress::default())
        } else {
            ProgressRender::Fancy(FancyProgress::new())
        };
        Self { inner }
    }

    /// Draw one update.
    ///
    /// Plain output goes to stdout and reports write failures such as a
    /// closed pipe. The terminal bar never fails.
    pub fn update(&mut self, update: &ProgressUpdate) -> io::Result<()> {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => {
                inner.update(update);
                Ok(())
            }
            ProgressRender::Plain(inner) => inner.write_update(&mut io::stdout(), update),
        }
    }

    /// Finish and clear the display.
    pub fn finish(&mut self) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.finish(),
            ProgressRender::Plain(inner) => inner.finish(),
        }
    }
}

impl Default for CliProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fancy Terminal Progress (indicatif)
// ============================================================================

struct FancyProgress {
    bar: ProgressBar,
    saw_total: bool,
}

impl FancyProgress {
    fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(BAR_STEPS), ProgressDrawTarget::stdout());
        bar.set_style(spinner_style());
        bar.set_prefix("⬇ starting");
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            saw_total: false,
        }
    }

    fn update(&mut self, update: &ProgressUpdate) {
        if update.total.is_some() && !self.saw_total {
            self.bar.set_style(bar_style());
            self.saw_total = true;
        }

        self.bar.set_prefix(format!("⬇ {}", format_label(&update.filename)));
        self.bar.set_message(describe(update));
        self.bar.set_position(bar_position(update.progress));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix} {spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix} {bar:28.cyan/blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Map a percentage onto the bar's step range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_position(progress: f64) -> u64 {
    let steps = (progress.clamp(0.0, 100.0) * 10.0).round() as u64;
    steps.min(BAR_STEPS)
}

// ============================================================================
// Plain Progress (non-terminal)
// ============================================================================

#[derive(Default)]
struct PlainProgress {
    last_line: Option<String>,
}

impl PlainProgress {
    fn write_update(&mut self, out: &mut impl Write, update: &ProgressUpdate) -> io::Result<()> {
        let label = format_label(&update.filename);
        let line = if label.is_empty() {
            format!("[{}] {}", update.state, describe(update))
        } else {
            format!("[{}] {label}: {}", update.state, describe(update))
        };

        // Speed refreshes can repeat the previous line verbatim.
        if self.last_line.as_deref() != Some(line.as_str()) {
            writeln!(out, "{line}")?;
            self.last_line = Some(line);
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.last_line = None;
    }
}

// ============================================================================
// Text Helpers
// ============================================================================

/// One-line description of an update: bytes, percent, speed and ETA.
pub fn describe(update: &ProgressUpdate) -> String {
    let downloaded = format_bytes(update.downloaded);
    let speed = format_speed(update.speed);
    let eta = format_eta(update.eta);

    match update.total {
        Some(total) => format!(
            "{downloaded} / {} ({:5.1}%) @ {speed} ETA {eta}",
            format_bytes(total),
            update.progress
        ),
        None => format!("{downloaded} downloaded @ {speed}"),
    }
}

/// Shorten a file path to its file name, truncated to a display width.
fn format_label(raw: &str) -> Cow<'_, str> {
    let name = std::path::Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(raw);

    if name.chars().count() <= MAX_LABEL {
        return Cow::Borrowed(name);
    }
    let mut buf: String = name.chars().take(MAX_LABEL - 1).collect();
    buf.push('…');
    Cow::Owned(buf)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mediagrab_core::DownloadState;

    fn sample(total: Option<u64>) -> ProgressUpdate {
        ProgressUpdate {
            progress: 50.0,
            downloaded: 2048,
            total,
            speed: Some(1536),
            eta: Some(65),
            filename: "/tmp/videos/clip.mp4".to_string(),
            state: DownloadState::Downloading,
        }
    }

    #[test]
    fn test_describe_with_total() {
        let text = describe(&sample(Some(4096)));
        assert_eq!(text, "2.0 KB / 4.0 KB ( 50.0%) @ 1.5 KB/s ETA 1:05");
    }

    #[test]
    fn test_describe_without_total() {
        let text = describe(&sample(None));
        assert_eq!(text, "2.0 KB downloaded @ 1.5 KB/s");
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

    #[test]
    fn test_plain_skips_repeated_lines() {
        let mut plain = PlainProgress::default();
        let mut out = Vec::new();

        plain.write_update(&mut out, &sample(Some(4096))).unwrap();
        plain.write_update(&mut out, &sample(Some(4096))).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "[Downloading] clip.mp4: 2.0 KB / 4.0 KB ( 50.0%) @ 1.5 KB/s ETA 1:05\n"
        );
    }

    #[test]
    fn test_plain_reports_closed_pipe() {
        let mut plain = PlainProgress::default();
        let err = plain
            .write_update(&mut ClosedPipe, &sample(None))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_format_label_uses_file_name() {
        assert_eq!(format_label("/tmp/videos/clip.mp4"), "clip.mp4");
        assert_eq!(format_label(""), "");
    }

    #[test]
    fn test_format_label_truncates_long() {
        let long_name = format!("{}.mp4", "a".repeat(50));
        let result = format_label(&long_name);
        assert_eq!(result.chars().count(), MAX_LABEL);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn test_bar_position() {
        assert_eq!(bar_position(0.0), 0);
        assert_eq!(bar_position(25.04), 250);
        assert_eq!(bar_position(100.0), BAR_STEPS);
        assert_eq!(bar_position(250.0), BAR_STEPS);
        assert_eq!(bar_position(-3.0), 0);
    }
}
