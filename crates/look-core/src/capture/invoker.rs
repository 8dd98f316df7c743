//! Capture and resize invocations of the macOS `screencapture` and `sips`
//! utilities.
//!
//! | Operation | Command line |
//! |-----------|--------------|
//! | screen | `screencapture -x [-m] <path>` |
//! | window | `screencapture -x -o -l<id> <path>` |
//! | resize | `sips --resampleHeightWidthMax <px> <path> --out <path>` |
//!
//! `-x` silences the shutter sound, `-m` restricts capture to the primary
//! display, and `-o` drops the window shadow. Every call is single-shot:
//! a non-zero exit is reported, never retried.

use std::path::Path;
use std::sync::Arc;

use super::constants;
use super::traits::CommandRunner;
use crate::error::{CaptureError, CaptureResult};
use crate::model::WindowId;

/// Invokes the OS capture and resize utilities through a [`CommandRunner`]
#[derive(Clone)]
pub struct CaptureInvoker {
    runner:        Arc<dyn CommandRunner>,
    screencapture: String,
    sips:          String,
}

impl CaptureInvoker {
    /// Creates an invoker using the configured utility paths
    /// (see [`constants::screencapture_program`] and [`constants::sips_program`]).
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_programs(runner, constants::screencapture_program(), constants::sips_program())
    }

    /// Creates an invoker with explicit utility paths
    pub fn with_programs(
        runner: Arc<dyn CommandRunner>,
        screencapture: impl Into<String>,
        sips: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            screencapture: screencapture.into(),
            sips: sips.into(),
        }
    }

    /// Captures the whole screen into `output`.
    ///
    /// With `primary_display_only` only the main display is captured;
    /// otherwise `screencapture` decides how to render every display.
    pub async fn capture_screen(
        &self,
        output: &Path,
        primary_display_only: bool,
    ) -> CaptureResult<()> {
        let args = screen_args(output, primary_display_only);
        let result = self.runner.run(&self.screencapture, &args).await?;

        if result.success() {
            tracing::debug!("captured screen to {}", output.display());
            Ok(())
        } else {
            tracing::warn!(status = ?result.status, stderr = %result.stderr, "screen capture failed");
            Err(CaptureError::ScreenCaptureFailed {
                status: result.status,
            })
        }
    }

    /// Captures a single window by identifier into `output`, without shadow.
    pub async fn capture_window(&self, window_id: WindowId, output: &Path) -> CaptureResult<()> {
        let args = window_args(window_id, output);
        let result = self.runner.run(&self.screencapture, &args).await?;

        if result.success() {
            tracing::debug!("captured window {} to {}", window_id, output.display());
            Ok(())
        } else {
            tracing::warn!(
                window_id,
                status = ?result.status,
                stderr = %result.stderr,
                "window capture failed"
            );
            Err(CaptureError::WindowCaptureFailed {
                window_id,
                status: result.status,
            })
        }
    }

    /// Downscales `path` in place so that neither dimension exceeds
    /// `max_dimension`. Images already within bounds are left to `sips`.
    ///
    /// On failure the original file is left untouched on disk.
    pub async fn resize_image(&self, path: &Path, max_dimension: u32) -> CaptureResult<()> {
        if max_dimension == 0 {
            return Err(CaptureError::InvalidParameter {
                parameter: "max_size".to_string(),
                reason:    "must be greater than 0".to_string(),
            });
        }

        let args = resize_args(path, max_dimension);
        let result = self.runner.run(&self.sips, &args).await?;

        if result.success() {
            tracing::debug!("resized {} to at most {}px", path.display(), max_dimension);
            Ok(())
        } else {
            tracing::warn!(status = ?result.status, stderr = %result.stderr, "resize failed");
            Err(CaptureError::ResizeFailed {
                path: path.to_path_buf(),
                max_dimension,
                status: result.status,
            })
        }
    }
}

impl std::fmt::Debug for CaptureInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureInvoker")
            .field("screencapture", &self.screencapture)
            .field("sips", &self.sips)
            .finish_non_exhaustive()
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn screen_args(output: &Path, primary_display_only: bool) -> Vec<String> {
    let mut args = vec!["-x".to_string()];
    if primary_display_only {
        args.push("-m".to_string());
    }
    args.push(path_arg(output));
    args
}

fn window_args(window_id: WindowId, output: &Path) -> Vec<String> {
    vec![
        "-x".to_string(),
        "-o".to_string(),
        format!("-l{window_id}"),
        path_arg(output),
    ]
}

fn resize_args(path: &Path, max_dimension: u32) -> Vec<String> {
    vec![
        "--resampleHeightWidthMax".to_string(),
        max_dimension.to_string(),
        path_arg(path),
        "--out".to_string(),
        path_arg(path),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::mock::MockCommandRunner;

    fn invoker(runner: &Arc<MockCommandRunner>) -> CaptureInvoker {
        CaptureInvoker::with_programs(runner.clone(), "screencapture", "sips")
    }

    #[test]
    fn test_screen_args() {
        let path = Path::new("/tmp/shot.png");
        assert_eq!(screen_args(path, true), vec!["-x", "-m", "/tmp/shot.png"]);
        assert_eq!(screen_args(path, false), vec!["-x", "/tmp/shot.png"]);
    }

    #[test]
    fn test_window_args() {
        assert_eq!(
            window_args(4711, Path::new("out.png")),
            vec!["-x", "-o", "-l4711", "out.png"]
        );
    }

    #[test]
    fn test_resize_args() {
        assert_eq!(
            resize_args(Path::new("out.png"), 800),
            vec!["--resampleHeightWidthMax", "800", "out.png", "--out", "out.png"]
        );
    }

    #[tokio::test]
    async fn test_capture_screen_invokes_screencapture() {
        let runner = Arc::new(MockCommandRunner::new());
        invoker(&runner)
            .capture_screen(Path::new("s.png"), true)
            .await
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "screencapture");
        assert_eq!(calls[0].args, vec!["-x", "-m", "s.png"]);
    }

    #[tokio::test]
    async fn test_capture_screen_failure() {
        let runner = Arc::new(MockCommandRunner::new().fail_program("screencapture", 1));
        let err = invoker(&runner)
            .capture_screen(Path::new("s.png"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::ScreenCaptureFailed { status: Some(1) }));
    }

    #[tokio::test]
    async fn test_capture_window_failure_carries_window_id() {
        let runner = Arc::new(MockCommandRunner::new().fail_program("screencapture", 1));
        let err = invoker(&runner)
            .capture_window(77, Path::new("w.png"))
            .await
            .unwrap_err();
        match err {
            CaptureError::WindowCaptureFailed { window_id, status } => {
                assert_eq!(window_id, 77);
                assert_eq!(status, Some(1));
            }
            other => panic!("expected WindowCaptureFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resize_invokes_sips_with_bound() {
        let runner = Arc::new(MockCommandRunner::new());
        invoker(&runner)
            .resize_image(Path::new("w.png"), 800)
            .await
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls[0].program, "sips");
        assert_eq!(calls[0].args[1], "800");
    }

    #[tokio::test]
    async fn test_resize_zero_rejected_without_invocation() {
        let runner = Arc::new(MockCommandRunner::new());
        let err = invoker(&runner)
            .resize_image(Path::new("w.png"), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::InvalidParameter { .. }));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_resize_failure() {
        let runner = Arc::new(MockCommandRunner::new().fail_program("sips", 2));
        let err = invoker(&runner)
            .resize_image(Path::new("w.png"), 1568)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CaptureError::ResizeFailed {
                max_dimension: 1568,
                status: Some(2),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_uses_configured_programs() {
        let runner = Arc::new(MockCommandRunner::new());
        let invoker =
            CaptureInvoker::with_programs(runner.clone(), "/opt/sc", "/opt/sips");
        invoker.capture_window(1, Path::new("a.png")).await.unwrap();
        invoker.resize_image(Path::new("a.png"), 10).await.unwrap();

        let programs: Vec<String> =
            runner.invocations().into_iter().map(|c| c.program).collect();
        assert_eq!(programs, vec!["/opt/sc", "/opt/sips"]);
    }
}
