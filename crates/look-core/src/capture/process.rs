//! Process invocation backed by `tokio::process`

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::traits::{CommandOutput, CommandRunner};
use crate::error::{CaptureError, CaptureResult};

/// Runs real programs on the host.
///
/// Stdout is discarded and stderr is captured for diagnostics. The child is
/// awaited to completion; no timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Creates a new SystemCommandRunner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> CaptureResult<CommandOutput> {
        tracing::debug!("running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CaptureError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        if !result.success() {
            tracing::debug!(
                status = ?result.status,
                stderr = %result.stderr,
                "{} exited unsuccessfully",
                program
            );
        }

        Ok(result)
    }
}
