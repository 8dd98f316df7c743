//! Error types for window enumeration and capture operations
//!
//! This module defines the error type shared by every stage of a capture
//! command. Each variant renders a single-line, user-facing message, and
//! [`CaptureError::remediation_hint`] supplies an actionable next step where
//! one exists (most importantly the Screen Recording permission hint for
//! failed window captures).

use std::path::PathBuf;

use crate::model::{WindowFilter, WindowId};

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Comprehensive error type for look-core operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// No windowing backend exists for this platform
    #[error("Window enumeration is not available on {platform}")]
    BackendNotAvailable {
        /// Operating system name
        platform: String,
    },

    /// The OS window query returned nothing usable
    #[error("Failed to query window list: {reason}")]
    EnumerationFailed {
        /// Reason reported by the enumerator
        reason: String,
    },

    /// No window survived the layer/size rule and the user filters
    #[error("No windows found{}", matching_suffix(.filter))]
    NoWindowsFound {
        /// The filters that were active
        filter: WindowFilter,
    },

    /// The window capture utility exited unsuccessfully
    #[error("Failed to capture window {window_id}{}", status_suffix(.status))]
    WindowCaptureFailed {
        /// Window that could not be captured
        window_id: WindowId,
        /// Exit code of the capture utility (None if killed by a signal)
        status:    Option<i32>,
    },

    /// The screen capture utility exited unsuccessfully
    #[error("Failed to capture screen{}", status_suffix(.status))]
    ScreenCaptureFailed {
        /// Exit code of the capture utility (None if killed by a signal)
        status: Option<i32>,
    },

    /// The image resize utility exited unsuccessfully
    #[error(
        "Failed to resize {} to {max_dimension}px{}",
        .path.display(),
        status_suffix(.status)
    )]
    ResizeFailed {
        /// Image that was left at its native size
        path:          PathBuf,
        /// Requested bound on the larger dimension
        max_dimension: u32,
        /// Exit code of the resize utility (None if killed by a signal)
        status:        Option<i32>,
    },

    /// An external utility could not be started at all
    #[error("Failed to run '{program}': {source}")]
    CommandSpawn {
        /// Program that failed to start
        program: String,
        /// Underlying spawn error
        #[source]
        source:  std::io::Error,
    },

    /// Invalid parameter provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Reason why it's invalid
        reason:    String,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn matching_suffix(filter: &WindowFilter) -> String {
    if filter.is_empty() {
        String::new()
    } else {
        format!(" matching {}", filter.describe())
    }
}

fn status_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" (exit status {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

impl CaptureError {
    /// Returns an actionable remediation hint for this error, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use look_core::error::CaptureError;
    ///
    /// let error = CaptureError::WindowCaptureFailed {
    ///     window_id: 42,
    ///     status:    Some(1),
    /// };
    ///
    /// let hint = error.remediation_hint().unwrap();
    /// assert!(hint.contains("Screen Recording"));
    /// ```
    pub fn remediation_hint(&self) -> Option<&'static str> {
        match self {
            CaptureError::BackendNotAvailable { .. } => {
                Some("look relies on macOS Quartz Window Services, screencapture and sips.")
            }
            CaptureError::EnumerationFailed { .. } => Some(
                "Ensure a window server session is available (look cannot run over plain SSH \
                 without a logged-in GUI session).",
            ),
            CaptureError::NoWindowsFound { .. } => Some(
                "Use --list to see available windows. Only normal windows of at least 600x400 \
                 are considered.",
            ),
            CaptureError::WindowCaptureFailed { .. } => Some(
                "Check Screen Recording permissions: System Settings > Privacy & Security > \
                 Screen Recording must allow your terminal.",
            ),
            CaptureError::ScreenCaptureFailed { .. } => Some(
                "Check Screen Recording permissions in System Settings > Privacy & Security.",
            ),
            CaptureError::ResizeFailed { .. } => {
                Some("The capture was kept at native resolution. Use --native to skip resizing.")
            }
            CaptureError::CommandSpawn { .. } => Some(
                "Ensure the macOS screencapture and sips utilities are on PATH, or point \
                 LOOK_SCREENCAPTURE_BIN / LOOK_SIPS_BIN at them.",
            ),
            CaptureError::InvalidParameter { .. } => None,
            CaptureError::IoError(_) => {
                Some("Check that the output directory is writable and the disk is not full.")
            }
        }
    }

    /// Whether the error means a required OS facility (window server binding,
    /// capture or resize utility) is missing.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(
            self,
            CaptureError::BackendNotAvailable { .. } | CaptureError::CommandSpawn { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_windows_found_without_filters() {
        let error = CaptureError::NoWindowsFound {
            filter: WindowFilter::default(),
        };
        assert_eq!(error.to_string(), "No windows found");
    }

    #[test]
    fn test_no_windows_found_names_active_filters() {
        let error = CaptureError::NoWindowsFound {
            filter: WindowFilter::new(Some("Chrome".into()), Some("Inbox".into())),
        };
        assert_eq!(
            error.to_string(),
            "No windows found matching app='Chrome', title='Inbox'"
        );
    }

    #[test]
    fn test_window_capture_failed_mentions_permission() {
        let error = CaptureError::WindowCaptureFailed {
            window_id: 99,
            status:    Some(1),
        };
        assert_eq!(error.to_string(), "Failed to capture window 99 (exit status 1)");
        assert!(error.remediation_hint().unwrap().contains("Screen Recording"));
    }

    #[test]
    fn test_screen_capture_failed_signal() {
        let error = CaptureError::ScreenCaptureFailed { status: None };
        assert_eq!(error.to_string(), "Failed to capture screen (terminated by signal)");
    }

    #[test]
    fn test_resize_failed_message() {
        let error = CaptureError::ResizeFailed {
            path:          PathBuf::from("shots/out.png"),
            max_dimension: 800,
            status:        Some(13),
        };
        assert_eq!(
            error.to_string(),
            "Failed to resize shots/out.png to 800px (exit status 13)"
        );
        assert!(!error.is_missing_dependency());
    }

    #[test]
    fn test_command_spawn_is_missing_dependency() {
        let error = CaptureError::CommandSpawn {
            program: "screencapture".to_string(),
            source:  std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("screencapture"));
        assert!(error.is_missing_dependency());
        assert!(error.remediation_hint().unwrap().contains("LOOK_SCREENCAPTURE_BIN"));
    }

    #[test]
    fn test_backend_not_available_message() {
        let error = CaptureError::BackendNotAvailable {
            platform: "linux".to_string(),
        };
        assert_eq!(error.to_string(), "Window enumeration is not available on linux");
        assert!(error.is_missing_dependency());
    }

    #[test]
    fn test_invalid_parameter_has_no_hint() {
        let error = CaptureError::InvalidParameter {
            parameter: "max_size".to_string(),
            reason:    "must be positive".to_string(),
        };
        assert!(error.remediation_hint().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: CaptureError = io.into();
        assert!(matches!(error, CaptureError::IoError(_)));
        assert!(error.to_string().starts_with("I/O error"));
    }
}
