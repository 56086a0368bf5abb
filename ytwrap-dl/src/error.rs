//! Error types for ytwrap-dl.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single yt-dlp invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Executable could not be resolved or vanished before spawn
    #[error("executable not found: {}", .program.display())]
    ExecutableNotFound { program: PathBuf },

    /// Process ran but exited non-zero (`code` is `None` when terminated by a signal)
    ///
    /// `stdout`/`stderr` hold the captured output when capture was enabled.
    #[error("{}", exit_message(.code))]
    Exit {
        code: Option<i32>,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    /// Any other failure while launching or waiting on the process
    #[error("failed to run yt-dlp")]
    Spawn(#[source] std::io::Error),
}

impl Error {
    /// Exit code reported by the external process, if it ran and failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Exit { code, .. } => *code,
            _ => None,
        }
    }

    /// Whether this error means the executable is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ExecutableNotFound { .. })
    }
}

fn exit_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("yt-dlp exited with code {code}"),
        None => "yt-dlp terminated by signal".to_string(),
    }
}

/// Result type alias for ytwrap-dl operations.
pub type Result<T> = std::result::Result<T, Error>;
