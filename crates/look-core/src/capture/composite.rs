//! Composite backend that bundles the OS-facing capabilities
//!
//! A capture command needs exactly two things from the host: a window list
//! and a way to run the capture/resize utilities. [`CompositeBackend`] holds
//! both as trait objects so the session workflow never names a concrete
//! platform type, and tests can swap in the doubles from
//! [`mock`](super::mock).
//!
//! # Example
//!
//! ```rust,ignore
//! use look_core::capture::create_default_backend;
//!
//! let backend = create_default_backend()?;
//! let windows = backend.enumerator.list_windows(true).await?;
//! backend.invoker().capture_window(windows[0].id, path).await?;
//! ```

use std::sync::Arc;

use super::mock::{MockCommandRunner, MockEnumerator};
use super::{CaptureInvoker, CommandRunner, WindowEnumerator};

/// Composite backend holding the enumeration and process capabilities.
pub struct CompositeBackend {
    /// Window enumeration capability.
    pub enumerator: Arc<dyn WindowEnumerator>,

    /// Process invocation capability used for capture and resize.
    pub runner: Arc<dyn CommandRunner>,

    /// Backend name for diagnostics.
    pub name: &'static str,
}

impl CompositeBackend {
    /// Creates a new CompositeBackend from its capabilities.
    pub fn new(
        enumerator: Arc<dyn WindowEnumerator>,
        runner: Arc<dyn CommandRunner>,
        name: &'static str,
    ) -> Self {
        Self {
            enumerator,
            runner,
            name,
        }
    }

    /// Returns an invoker for the configured capture and resize utilities.
    pub fn invoker(&self) -> CaptureInvoker {
        CaptureInvoker::new(self.runner.clone())
    }
}

impl std::fmt::Debug for CompositeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeBackend")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Creates a CompositeBackend from the macOS Quartz enumerator and the
/// system process runner.
#[cfg(target_os = "macos")]
pub fn composite_from_quartz() -> CompositeBackend {
    use super::{QuartzEnumerator, SystemCommandRunner};

    CompositeBackend::new(
        Arc::new(QuartzEnumerator::new()),
        Arc::new(SystemCommandRunner::new()),
        "quartz",
    )
}

/// Creates a CompositeBackend from the mock doubles.
pub fn composite_from_mock(
    enumerator: Arc<MockEnumerator>,
    runner: Arc<MockCommandRunner>,
) -> CompositeBackend {
    CompositeBackend::new(enumerator, runner, "mock")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_from_mock() {
        let backend = composite_from_mock(
            Arc::new(MockEnumerator::default()),
            Arc::new(MockCommandRunner::new()),
        );
        assert_eq!(backend.name, "mock");
        assert!(format!("{:?}", backend).contains("mock"));
    }

    #[tokio::test]
    async fn test_invoker_shares_runner() {
        let runner = Arc::new(MockCommandRunner::new());
        let backend = composite_from_mock(Arc::new(MockEnumerator::default()), runner.clone());

        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("shot.png");
        backend.invoker().resize_image(&image, 100).await.unwrap();

        assert_eq!(runner.invocations_of("sips").len(), 1);
    }
}
