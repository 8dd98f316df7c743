//! Capability traits for window enumeration and process invocation
//!
//! Capture and resize are delegated to OS utilities, so the only seams are:
//!
//! - [`WindowEnumerator`]: query the windowing system for window metadata
//! - [`CommandRunner`]: run an external utility and report its exit status
//!
//! Both are object safe so a [`CompositeBackend`](super::CompositeBackend)
//! can hold either the real implementations or test doubles.

use async_trait::async_trait;

use crate::error::CaptureResult;
use crate::model::WindowInfo;

/// Capability: Backend can enumerate windows on the system.
///
/// # Platform Support
///
/// - **macOS**: Quartz Window Services (`CGWindowListCopyWindowInfo`)
/// - **Other**: Not supported
#[async_trait]
pub trait WindowEnumerator: Send + Sync {
    /// Lists windows known to the window server.
    ///
    /// When `include_off_screen` is false only windows currently visible on
    /// some display are returned. Ordering is whatever the OS reports, which
    /// is front-to-back on macOS but not guaranteed.
    async fn list_windows(&self, include_off_screen: bool) -> CaptureResult<Vec<WindowInfo>>;
}

/// Outcome of a single external utility invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    /// Captured standard error, kept for diagnostics
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a process that exited with the given code
    pub fn exited(code: i32) -> Self {
        Self {
            status: Some(code),
            stderr: String::new(),
        }
    }

    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Capability: run an external program to completion.
///
/// Implementations block (asynchronously) until the program exits. No
/// retries and no timeouts are applied.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its exit status.
    ///
    /// A program that cannot be started at all is an error
    /// ([`CaptureError::CommandSpawn`](crate::error::CaptureError::CommandSpawn));
    /// a program that starts and exits non-zero is a successful call with an
    /// unsuccessful [`CommandOutput`].
    async fn run(&self, program: &str, args: &[String]) -> CaptureResult<CommandOutput>;
}
