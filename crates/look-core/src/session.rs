//! The list and capture workflows behind the `look` command.
//!
//! A capture runs one fixed sequence: resolve the output path, create its
//! directory, capture the screen or the first matching window, optionally
//! resize, then report the file size. Nothing is retried and nothing loops.
//!
//! ```text
//! START ─┬─ LIST ──────────────────────────────► report / NoWindowsFound
//!        └─ CAPTURE ─┬─ SCREEN ─┬─ [RESIZE] ──► REPORT
//!                    └─ WINDOW ─┘
//! ```
//!
//! Resize failures never fail the run: the native-resolution capture stays
//! on disk and the report carries [`ResizeOutcome::Failed`].

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::capture::CompositeBackend;
use crate::capture::selection::{first_match, select_windows};
use crate::error::{CaptureError, CaptureResult};
use crate::model::{CaptureTarget, WindowFilter, WindowInfo};
use crate::util::filename::{ensure_parent_dir, filename_prefix, generate_filename};

/// Parameters of a single capture command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Explicit output path; generated from the target when `None`
    pub output:               Option<PathBuf>,
    /// App/title filters used to pick the window
    pub filter:               WindowFilter,
    /// Capture the screen instead of a window
    pub screen:               bool,
    /// Restrict screen capture to the primary display
    pub primary_display_only: bool,
    /// Consider windows that are not currently on screen
    pub include_off_screen:   bool,
    /// Bound on the larger dimension; `None` keeps native resolution
    pub max_size:             Option<u32>,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            output:               None,
            filter:               WindowFilter::default(),
            screen:               false,
            primary_display_only: true,
            include_off_screen:   true,
            max_size:             Some(crate::capture::constants::DEFAULT_MAX_SIZE),
        }
    }
}

impl CaptureRequest {
    /// Returns the explicit output path, or a timestamped name in the current
    /// directory derived from the target.
    pub fn resolve_output_path(&self, now: NaiveDateTime) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let prefix = filename_prefix(
                    self.screen,
                    self.filter.app.as_deref(),
                    self.filter.title.as_deref(),
                );
                generate_filename(&prefix, now)
            }
        }
    }
}

/// What happened to the optional resize step
#[derive(Debug)]
pub enum ResizeOutcome {
    /// Resizing was disabled (`--native` or a zero bound)
    Skipped,
    /// The image was bounded to `max_dimension`
    Resized { max_dimension: u32 },
    /// The resize utility failed; the capture is kept at native size
    Failed(CaptureError),
}

/// Result of a successful capture command
#[derive(Debug)]
pub struct CaptureReport {
    /// Where the image was written
    pub path:   PathBuf,
    /// Final size of the file on disk, after any resize
    pub bytes:  u64,
    /// What was captured
    pub target: CaptureTarget,
    /// Outcome of the resize step
    pub resize: ResizeOutcome,
}

/// Lists the capturable windows matching `filter`, in enumeration order.
///
/// An empty selection is reported as [`CaptureError::NoWindowsFound`].
pub async fn list(
    backend: &CompositeBackend,
    filter: &WindowFilter,
    include_off_screen: bool,
) -> CaptureResult<Vec<WindowInfo>> {
    let windows = backend.enumerator.list_windows(include_off_screen).await?;
    let selected = select_windows(&windows, filter);

    if selected.is_empty() {
        return Err(CaptureError::NoWindowsFound {
            filter: filter.clone(),
        });
    }
    Ok(selected)
}

/// Runs a capture command, writing progress lines to `status`.
///
/// Progress lines are `Capturing screen...` or
/// `Capturing: {app} - {title} ({w}x{h})`. The final `Saved:` line is left to
/// the caller, which decides how to render the [`CaptureReport`].
pub async fn capture(
    backend: &CompositeBackend,
    request: &CaptureRequest,
    status: &mut dyn Write,
) -> CaptureResult<CaptureReport> {
    let path = request.resolve_output_path(Local::now().naive_local());
    ensure_parent_dir(&path)?;

    let invoker = backend.invoker();

    let target = if request.screen {
        writeln!(status, "Capturing screen...")?;
        invoker
            .capture_screen(&path, request.primary_display_only)
            .await?;
        CaptureTarget::Screen {
            primary_display_only: request.primary_display_only,
        }
    } else {
        let windows = backend
            .enumerator
            .list_windows(request.include_off_screen)
            .await?;
        // First match wins; multiple matches are not disambiguated
        let window =
            first_match(&windows, &request.filter).ok_or_else(|| CaptureError::NoWindowsFound {
                filter: request.filter.clone(),
            })?;

        writeln!(status, "Capturing: {}", window.describe())?;
        invoker.capture_window(window.id, &path).await?;
        CaptureTarget::Window(window)
    };

    let resize = match request.max_size {
        Some(max_dimension) if max_dimension > 0 => {
            match invoker.resize_image(&path, max_dimension).await {
                Ok(()) => ResizeOutcome::Resized { max_dimension },
                Err(err) => {
                    tracing::warn!("keeping native resolution: {}", err);
                    ResizeOutcome::Failed(err)
                }
            }
        }
        _ => ResizeOutcome::Skipped,
    };

    let bytes = file_size(&path)?;
    tracing::info!(path = %path.display(), bytes, target = %target, "capture saved");

    Ok(CaptureReport {
        path,
        bytes,
        target,
        resize,
    })
}

fn file_size(path: &Path) -> CaptureResult<u64> {
    Ok(std::fs::metadata(path)?.len())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::capture::composite_from_mock;
    use crate::capture::mock::{MockCommandRunner, MockEnumerator, MockFailure};

    fn backend(
        enumerator: MockEnumerator,
        runner: MockCommandRunner,
    ) -> (CompositeBackend, Arc<MockCommandRunner>) {
        let runner = Arc::new(runner);
        (composite_from_mock(Arc::new(enumerator), runner.clone()), runner)
    }

    fn request_in(dir: &Path, name: &str) -> CaptureRequest {
        CaptureRequest {
            output: Some(dir.join(name)),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_output_path_generated() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 25, 3)
            .unwrap();

        let request = CaptureRequest {
            filter: WindowFilter::by_app("My App!"),
            ..Default::default()
        };
        assert_eq!(
            request.resolve_output_path(now),
            PathBuf::from("2026-10-19-142503-my-app-.png")
        );

        let screen = CaptureRequest {
            screen: true,
            ..Default::default()
        };
        assert_eq!(
            screen.resolve_output_path(now),
            PathBuf::from("2026-10-19-142503-screen.png")
        );
    }

    #[test]
    fn test_resolve_output_path_explicit() {
        let request = CaptureRequest {
            output: Some(PathBuf::from("shots/x.png")),
            ..Default::default()
        };
        assert_eq!(
            request.resolve_output_path(NaiveDateTime::default()),
            PathBuf::from("shots/x.png")
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_app() {
        let (backend, _) = backend(MockEnumerator::with_sample_desktop(), MockCommandRunner::new());
        let windows = list(&backend, &WindowFilter::by_app("Chrome"), true).await.unwrap();
        let ids: Vec<u32> = windows.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![101, 103]);
    }

    #[tokio::test]
    async fn test_list_empty_is_no_windows_found() {
        let (backend, _) = backend(MockEnumerator::default(), MockCommandRunner::new());
        let err = list(&backend, &WindowFilter::default(), true).await.unwrap_err();
        assert_eq!(err.to_string(), "No windows found");
    }

    #[tokio::test]
    async fn test_list_respects_on_screen_flag() {
        let enumerator = MockEnumerator::with_sample_desktop().with_off_screen(101);
        let (backend, _) = backend(enumerator, MockCommandRunner::new());

        let visible = list(&backend, &WindowFilter::by_app("chrome"), false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 103);
    }

    #[tokio::test]
    async fn test_capture_window_with_resize() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, runner) = backend(
            MockEnumerator::with_sample_desktop(),
            MockCommandRunner::new().with_file_sizes(90_000, 30_000),
        );
        let request = CaptureRequest {
            filter: WindowFilter::by_app("chrome"),
            max_size: Some(800),
            ..request_in(dir.path(), "out.png")
        };

        let mut status = Vec::new();
        let report = capture(&backend, &request, &mut status).await.unwrap();

        assert_eq!(
            String::from_utf8(status).unwrap(),
            "Capturing: Google Chrome - Inbox - Gmail (1440x900)\n"
        );
        assert_eq!(report.bytes, 30_000);
        assert!(matches!(report.resize, ResizeOutcome::Resized { max_dimension: 800 }));
        assert!(matches!(report.target, CaptureTarget::Window(ref w) if w.id == 101));

        let capture_calls = runner.invocations_of("screencapture");
        assert!(capture_calls[0].args.contains(&"-l101".to_string()));
        let sips_calls = runner.invocations_of("sips");
        assert_eq!(sips_calls[0].args[1], "800");
    }

    #[tokio::test]
    async fn test_capture_native_skips_resize() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, runner) = backend(MockEnumerator::with_sample_desktop(), MockCommandRunner::new());
        let request = CaptureRequest {
            max_size: None,
            ..request_in(dir.path(), "native.png")
        };

        let report = capture(&backend, &request, &mut Vec::new()).await.unwrap();
        assert!(matches!(report.resize, ResizeOutcome::Skipped));
        assert_eq!(report.bytes, MockCommandRunner::DEFAULT_CAPTURE_BYTES as u64);
        assert!(runner.invocations_of("sips").is_empty());
    }

    #[tokio::test]
    async fn test_capture_zero_max_size_skips_resize() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, runner) = backend(MockEnumerator::with_sample_desktop(), MockCommandRunner::new());
        let request = CaptureRequest {
            max_size: Some(0),
            ..request_in(dir.path(), "zero.png")
        };

        let report = capture(&backend, &request, &mut Vec::new()).await.unwrap();
        assert!(matches!(report.resize, ResizeOutcome::Skipped));
        assert!(runner.invocations_of("sips").is_empty());
    }

    #[tokio::test]
    async fn test_capture_screen_primary_display() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, runner) = backend(
            MockEnumerator::default().with_failure(MockFailure::EnumerationFailed),
            MockCommandRunner::new(),
        );
        let request = CaptureRequest {
            screen: true,
            ..request_in(dir.path(), "screen.png")
        };

        let mut status = Vec::new();
        let report = capture(&backend, &request, &mut status).await.unwrap();

        // Screen capture never consults the enumerator
        assert_eq!(String::from_utf8(status).unwrap(), "Capturing screen...\n");
        assert_eq!(
            report.target,
            CaptureTarget::Screen {
                primary_display_only: true
            }
        );
        let calls = runner.invocations_of("screencapture");
        assert_eq!(calls[0].args[..2], ["-x".to_string(), "-m".to_string()]);
    }

    #[tokio::test]
    async fn test_capture_no_match_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, runner) = backend(MockEnumerator::with_sample_desktop(), MockCommandRunner::new());
        let request = CaptureRequest {
            filter: WindowFilter::new(Some("Xcode".into()), Some("Build".into())),
            ..request_in(dir.path(), "none.png")
        };

        let err = capture(&backend, &request, &mut Vec::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No windows found matching app='Xcode', title='Build'"
        );
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_capture_window_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, runner) = backend(
            MockEnumerator::with_sample_desktop(),
            MockCommandRunner::new().fail_program("screencapture", 1),
        );
        let request = request_in(dir.path(), "fail.png");

        let err = capture(&backend, &request, &mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, CaptureError::WindowCaptureFailed { window_id: 101, .. }));
        assert!(err.remediation_hint().unwrap().contains("Screen Recording"));
        assert!(runner.invocations_of("sips").is_empty());
    }

    #[tokio::test]
    async fn test_resize_failure_keeps_capture() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, _) = backend(
            MockEnumerator::with_sample_desktop(),
            MockCommandRunner::new()
                .with_file_sizes(70_000, 10)
                .fail_program("sips", 1),
        );
        let request = request_in(dir.path(), "kept.png");

        let report = capture(&backend, &request, &mut Vec::new()).await.unwrap();
        assert!(matches!(
            report.resize,
            ResizeOutcome::Failed(CaptureError::ResizeFailed { .. })
        ));
        assert_eq!(report.bytes, 70_000);
        assert!(report.path.exists());
    }

    #[tokio::test]
    async fn test_capture_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, _) = backend(MockEnumerator::with_sample_desktop(), MockCommandRunner::new());
        let request = CaptureRequest {
            output: Some(dir.path().join("nested").join("deeper").join("w.png")),
            ..Default::default()
        };

        let report = capture(&backend, &request, &mut Vec::new()).await.unwrap();
        assert!(report.path.exists());
    }
}
