//! Mock enumerator and command runner for testing
//!
//! This module provides test doubles for the two OS-facing seams so the
//! selection and capture workflow can be exercised deterministically on any
//! platform:
//!
//! - [`MockEnumerator`] returns a fixed window list (optionally honouring the
//!   on-screen flag) or an injected error.
//! - [`MockCommandRunner`] records every invocation, simulates the files that
//!   `screencapture` and `sips` would produce, and can be told to fail.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use look_core::capture::{CommandRunner, mock::MockCommandRunner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let runner = Arc::new(MockCommandRunner::new().fail_program("sips", 1));
//!
//!     let output = runner.run("sips", &[]).await.unwrap();
//!     assert!(!output.success());
//!     assert_eq!(runner.invocations().len(), 1);
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::{CommandOutput, CommandRunner, WindowEnumerator};
use crate::error::{CaptureError, CaptureResult};
use crate::model::{WindowId, WindowInfo};

/// Mock window enumerator with a predefined window list
#[derive(Debug, Default)]
pub struct MockEnumerator {
    windows:    Vec<WindowInfo>,
    off_screen: HashSet<WindowId>,
    /// Optional error to inject for testing error handling
    fail_with:  Option<MockFailure>,
}

/// Errors the mock enumerator can be told to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Behave as if the window server binding is missing
    BackendNotAvailable,
    /// Behave as if the window list query returned nothing
    EnumerationFailed,
}

impl MockEnumerator {
    /// Creates an enumerator that reports exactly `windows`, in order
    pub fn new(windows: Vec<WindowInfo>) -> Self {
        Self {
            windows,
            ..Default::default()
        }
    }

    /// Creates an enumerator with a typical desktop: two Chrome windows,
    /// a Finder window, a terminal, plus the menubar and Dock.
    pub fn with_sample_desktop() -> Self {
        Self::new(vec![
            WindowInfo::new(31, "Window Server", "Menubar", (0, 0), (1728, 37), 24),
            WindowInfo::new(101, "Google Chrome", "Inbox - Gmail", (0, 37), (1440, 900), 0),
            WindowInfo::new(102, "Finder", "Downloads", (200, 120), (920, 640), 0),
            WindowInfo::new(103, "Google Chrome", "LinkedIn", (60, 60), (1280, 800), 0),
            WindowInfo::new(104, "Ghostty", "~/src/look", (300, 200), (1200, 760), 0),
            WindowInfo::new(32, "Dock", "Dock", (0, 1040), (1728, 80), 20),
        ])
    }

    /// Marks a window as off-screen (minimized or on another Space)
    pub fn with_off_screen(mut self, id: WindowId) -> Self {
        self.off_screen.insert(id);
        self
    }

    /// Injects a failure returned by every `list_windows` call
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.fail_with = Some(failure);
        self
    }
}

#[async_trait]
impl WindowEnumerator for MockEnumerator {
    async fn list_windows(&self, include_off_screen: bool) -> CaptureResult<Vec<WindowInfo>> {
        match self.fail_with {
            Some(MockFailure::BackendNotAvailable) => {
                return Err(CaptureError::BackendNotAvailable {
                    platform: "mock".to_string(),
                });
            }
            Some(MockFailure::EnumerationFailed) => {
                return Err(CaptureError::EnumerationFailed {
                    reason: "mock window server unavailable".to_string(),
                });
            }
            None => {}
        }

        Ok(self
            .windows
            .iter()
            .filter(|w| include_off_screen || !self.off_screen.contains(&w.id))
            .cloned()
            .collect())
    }
}

/// A recorded program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args:    Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum ProgramBehavior {
    Exit(i32),
    SpawnError,
}

/// Recording command runner that simulates `screencapture` and `sips`.
///
/// Successful `screencapture` calls write `capture_bytes` bytes to the output
/// path (the last argument); successful `sips` calls rewrite the file with
/// `resized_bytes` bytes. Programs are matched by file name, so
/// `/usr/sbin/screencapture` behaves like `screencapture`.
#[derive(Debug)]
pub struct MockCommandRunner {
    invocations:   Mutex<Vec<Invocation>>,
    behaviors:     HashMap<String, ProgramBehavior>,
    capture_bytes: usize,
    resized_bytes: usize,
}

impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommandRunner {
    /// Default size of a simulated capture
    pub const DEFAULT_CAPTURE_BYTES: usize = 48_213;
    /// Default size of a simulated resize result
    pub const DEFAULT_RESIZED_BYTES: usize = 12_345;

    /// Creates a runner where every program succeeds
    pub fn new() -> Self {
        Self {
            invocations:   Mutex::new(Vec::new()),
            behaviors:     HashMap::new(),
            capture_bytes: Self::DEFAULT_CAPTURE_BYTES,
            resized_bytes: Self::DEFAULT_RESIZED_BYTES,
        }
    }

    /// Makes `program` exit with `code` instead of succeeding
    pub fn fail_program(mut self, program: &str, code: i32) -> Self {
        self.behaviors
            .insert(program.to_string(), ProgramBehavior::Exit(code));
        self
    }

    /// Makes `program` fail to start, as if it were not installed
    pub fn missing_program(mut self, program: &str) -> Self {
        self.behaviors
            .insert(program.to_string(), ProgramBehavior::SpawnError);
        self
    }

    /// Sets the sizes of the files written by simulated capture and resize
    pub fn with_file_sizes(mut self, capture_bytes: usize, resized_bytes: usize) -> Self {
        self.capture_bytes = capture_bytes;
        self.resized_bytes = resized_bytes;
        self
    }

    /// Returns every invocation so far, in call order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    /// Returns invocations of a program (matched by file name)
    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations
            .lock()
            .iter()
            .filter(|inv| program_name(&inv.program) == program)
            .cloned()
            .collect()
    }

    fn simulate_output(&self, name: &str, args: &[String]) -> std::io::Result<()> {
        let bytes = match name {
            "screencapture" => self.capture_bytes,
            "sips" => self.resized_bytes,
            _ => return Ok(()),
        };

        if let Some(path) = args.last() {
            std::fs::write(path, vec![0u8; bytes])?;
        }
        Ok(())
    }
}

fn program_name(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program)
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> CaptureResult<CommandOutput> {
        self.invocations.lock().push(Invocation {
            program: program.to_string(),
            args:    args.to_vec(),
        });

        let name = program_name(program);
        match self.behaviors.get(name).copied() {
            Some(ProgramBehavior::SpawnError) => Err(CaptureError::CommandSpawn {
                program: program.to_string(),
                source:  std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            }),
            Some(ProgramBehavior::Exit(code)) => Ok(CommandOutput {
                status: Some(code),
                stderr: format!("{name}: simulated failure"),
            }),
            None => {
                self.simulate_output(name, args)?;
                Ok(CommandOutput::exited(0))
            }
        }
    }
}
