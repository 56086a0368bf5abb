//! ytw - yt-dlp front-end

use clap::Parser;
use eyre::Result;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use ytwrap::cli::{Cli, failure_exit_code, run_cli};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    match run_cli(Cli::parse()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // yt-dlp already reported its own failure; mirror its exit code
        Err(report) => match failure_exit_code(&report) {
            Some(code) => Ok(ExitCode::from(code)),
            None => Err(report),
        },
    }
}
