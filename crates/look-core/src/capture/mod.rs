//! Window enumeration, selection and capture invocation
//!
//! # Architecture
//!
//! Pixel capture and resampling are delegated to OS utilities, so this module
//! is organised around two narrow capability traits:
//!
//! - [`WindowEnumerator`] - list windows with metadata (Quartz on macOS)
//! - [`CommandRunner`] - run an external utility and report its exit status
//!
//! On top of those sit the pure [`selection`] rules and the
//! [`CaptureInvoker`], which knows the `screencapture`/`sips` command lines.
//!
//! ## Recommended Usage
//!
//! ```rust,ignore
//! use look_core::capture::{create_default_backend, selection};
//! use look_core::model::WindowFilter;
//!
//! let backend = create_default_backend()?;
//! let windows = backend.enumerator.list_windows(true).await?;
//! if let Some(target) = selection::first_match(&windows, &WindowFilter::by_app("Safari")) {
//!     backend.invoker().capture_window(target.id, path).await?;
//! }
//! ```
//!
//! ## Backend Capabilities
//!
//! | Backend | WindowEnumerator | CommandRunner |
//! |---------|------------------|---------------|
//! | Quartz (macOS) | ✓ | ✓ (`tokio::process`) |
//! | Mock    | ✓ | ✓ (recording) |

use std::sync::Arc;

use crate::error::CaptureResult;

pub mod composite;
pub mod constants;
pub mod invoker;
pub mod mock;
pub mod process;
pub mod selection;
pub mod traits;

#[cfg(target_os = "macos")]
pub mod quartz_backend;

pub use composite::CompositeBackend;
pub use composite::composite_from_mock;
#[cfg(target_os = "macos")]
pub use composite::composite_from_quartz;
pub use invoker::CaptureInvoker;
pub use mock::{MockCommandRunner, MockEnumerator};
pub use process::SystemCommandRunner;
#[cfg(target_os = "macos")]
pub use quartz_backend::QuartzEnumerator;
pub use traits::{CommandOutput, CommandRunner, WindowEnumerator};

/// Creates the capture backend for the current platform.
///
/// - **macOS**: Quartz window enumeration plus the system process runner
/// - **Other**: a structured `BackendNotAvailable` error; look depends on
///   macOS-only facilities and this is fatal at startup
pub fn create_default_backend() -> CaptureResult<Arc<CompositeBackend>> {
    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(composite_from_quartz()))
    }

    #[cfg(not(target_os = "macos"))]
    {
        Err(crate::error::CaptureError::BackendNotAvailable {
            platform: std::env::consts::OS.to_string(),
        })
    }
}
