//! look: capture application windows or the screen to PNG files
//!
//! Windows are found through the macOS window list, filtered by app and
//! title, and captured with `screencapture`. Results are downscaled with
//! `sips` so they stay within image-model input limits.

mod app;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use look_core::capture::create_default_backend;
use tracing_subscriber::EnvFilter;

use crate::app::{Cli, EXIT_FAILURE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let backend = match create_default_backend() {
        Ok(backend) => backend,
        Err(err) => {
            let _ = app::report_error(&err.into(), &mut stdout, &mut stderr);
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };
    tracing::debug!("using {} backend", backend.name);

    let code = app::run(&cli, &backend, &mut stdout, &mut stderr).await;
    Ok(ExitCode::from(code))
}

/// Logs go to stderr so stdout stays reserved for command output.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("look_cli={level}").parse()?)
                .add_directive(format!("look_core={level}").parse()?),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
