//! Argument parsing and output rendering for the `look` command

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use look_core::capture::CompositeBackend;
use look_core::capture::constants::default_max_size;
use look_core::error::CaptureError;
use look_core::model::WindowFilter;
use look_core::session::{self, CaptureRequest, ResizeOutcome};
use look_core::util::filename::format_byte_count;

/// Process exit status for a successful run
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit status for any failure
pub const EXIT_FAILURE: u8 = 1;

const EXAMPLES: &str = "\
Examples:
  look                              Capture frontmost window
  look --app Ghostty                Capture Ghostty window
  look --title \"LinkedIn\"           Capture window with LinkedIn in title
  look --screen                     Capture entire screen
  look --list                       List all windows
  look --list --app Chrome          List Chrome windows";

#[derive(Debug, Parser)]
#[command(name = "look", version)]
#[command(about = "Capture windows or screen to PNG files")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Output PNG path (auto-generated if omitted)
    pub output: Option<PathBuf>,

    /// Filter by application name (case-insensitive substring match)
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Filter by window title (case-insensitive substring match)
    #[arg(long, value_name = "MATCH")]
    pub title: Option<String>,

    /// List available windows instead of capturing
    #[arg(long)]
    pub list: bool,

    /// Capture entire screen instead of a window
    #[arg(long)]
    pub screen: bool,

    /// Resize so largest dimension is at most PX [default: 1568, or $LOOK_MAX_SIZE]
    #[arg(long, value_name = "PX")]
    pub max_size: Option<u32>,

    /// Skip resizing, keep native resolution
    #[arg(long)]
    pub native: bool,

    /// Print the window list as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Only consider windows currently visible on a display
    #[arg(long)]
    pub on_screen: bool,

    /// Capture every display instead of only the primary one
    #[arg(long, requires = "screen")]
    pub all_displays: bool,

    /// Enable verbose logging output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn filter(&self) -> WindowFilter {
        WindowFilter::new(self.app.clone(), self.title.clone())
    }

    /// Builds the capture request, resolving the max size default
    pub fn capture_request(&self) -> CaptureRequest {
        let max_size = if self.native {
            None
        } else {
            Some(self.max_size.unwrap_or_else(default_max_size))
        };

        CaptureRequest {
            output: self.output.clone(),
            filter: self.filter(),
            screen: self.screen,
            primary_display_only: !self.all_displays,
            include_off_screen: !self.on_screen,
            max_size,
        }
    }
}

/// Runs the parsed command against `backend` and returns the exit status.
///
/// Status lines go to `out`; diagnostics go to `err`. Every failure is
/// rendered as a single line.
pub async fn run(
    cli: &Cli,
    backend: &CompositeBackend,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8 {
    let result = if cli.list {
        list_windows(cli, backend, out).await
    } else {
        capture(cli, backend, out, err).await
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            tracing::debug!("command failed: {:#}", error);
            // Nothing more can be reported if the streams themselves fail
            let _ = report_error(&error, out, err);
            EXIT_FAILURE
        }
    }
}

async fn list_windows(cli: &Cli, backend: &CompositeBackend, out: &mut dyn Write) -> Result<()> {
    let windows = session::list(backend, &cli.filter(), !cli.on_screen).await?;

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&windows)?)?;
        return Ok(());
    }

    writeln!(out, "Available windows ({}):", windows.len())?;
    for w in &windows {
        writeln!(out, "  [{}] {}: {} ({}x{})", w.id, w.app, w.title, w.width, w.height)?;
    }
    Ok(())
}

async fn capture(
    cli: &Cli,
    backend: &CompositeBackend,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let request = cli.capture_request();
    let report = session::capture(backend, &request, out).await?;

    if let ResizeOutcome::Failed(resize_error) = &report.resize {
        writeln!(err, "Warning: {}", one_line(resize_error))?;
    }

    writeln!(
        out,
        "Saved: {} ({} bytes)",
        report.path.display(),
        format_byte_count(report.bytes)
    )?;
    Ok(())
}

fn one_line(error: &CaptureError) -> String {
    match error.remediation_hint() {
        Some(hint) => format!("{error} - {hint}"),
        None => error.to_string(),
    }
}

/// Renders a failure. A missing match is an ordinary outcome and goes to
/// stdout; everything else is a diagnostic on stderr.
pub fn report_error(
    error: &anyhow::Error,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> std::io::Result<()> {
    match error.downcast_ref::<CaptureError>() {
        Some(not_found @ CaptureError::NoWindowsFound { .. }) => writeln!(out, "{not_found}"),
        Some(missing) if missing.is_missing_dependency() => {
            writeln!(err, "Error: missing dependency: {}", one_line(missing))
        }
        Some(capture_error) => writeln!(err, "Error: {}", one_line(capture_error)),
        None => writeln!(err, "Error: {error:#}"),
    }
}
