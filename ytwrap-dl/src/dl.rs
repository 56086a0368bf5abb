//! yt-dlp subprocess invocation.
//!
//! ```no_run
//! use ytwrap_dl::dl::YtDlp;
//! use ytwrap_dl::options::Options;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ytdlp = YtDlp::locate()?;
//! let opts = Options::new()
//!     .with("format", "bestvideo[height<=?720]+bestaudio/best")
//!     .with("download_archive", "archive.txt");
//!
//! ytdlp.run("https://youtube.com/watch?v=example", &opts)?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::options::{Options, Targets, build_args};
use crate::presets::{AudioOnly, BestQuality, ListFormats, SelfUpdate, SpecificFormat};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Executable name searched for on `PATH`.
pub const PROGRAM: &str = "yt-dlp";

const RULE: &str = "-------------------------";

/// Outcome of a successful invocation.
///
/// `stdout`/`stderr` are only populated when capture is enabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completed {
    pub code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Handle to a resolved yt-dlp executable.
#[derive(Clone, Debug)]
pub struct YtDlp {
    program: PathBuf,
    echo: bool,
    capture: bool,
}

impl YtDlp {
    /// Use `program` as-is without checking that it exists.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            echo: true,
            capture: false,
        }
    }

    /// Resolve `yt-dlp` from `PATH`.
    pub fn locate() -> Result<Self> {
        Self::locate_from(None)
    }

    /// Resolve `explicit` (name or path) when given, otherwise `yt-dlp` from `PATH`.
    pub fn locate_from(explicit: Option<&Path>) -> Result<Self> {
        let program = match explicit {
            Some(path) => which::which(path).map_err(|_| Error::ExecutableNotFound {
                program: path.to_path_buf(),
            })?,
            None => which::which(PROGRAM).map_err(|_| Error::ExecutableNotFound {
                program: PathBuf::from(PROGRAM),
            })?,
        };

        tracing::debug!(program = %program.display(), "resolved yt-dlp");
        Ok(Self::new(program))
    }

    /// Print the assembled command line before running (default: on).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Capture stdout/stderr instead of inheriting the terminal (default: off).
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument vector (excluding the program) for `targets` and `opts`.
    ///
    /// Targets are passed verbatim. A `--` is placed before them when one
    /// starts with `-`, so yt-dlp does not parse it as an option.
    pub fn args(targets: &Targets, opts: &Options) -> Vec<String> {
        let mut args = build_args(opts);
        if targets.needs_separator() {
            args.push("--".to_string());
        }
        args.extend(targets.as_slice().iter().cloned());
        args
    }

    /// Run yt-dlp on `targets` with `opts`.
    ///
    /// Returns `Ok(None)` without spawning anything when `targets` is empty.
    pub fn run(&self, targets: impl Into<Targets>, opts: &Options) -> Result<Option<Completed>> {
        let targets = targets.into();

        if targets.is_empty() {
            tracing::warn!("no URLs provided, skipping yt-dlp");
            return Ok(None);
        }

        self.execute(Self::args(&targets, opts)).map(Some)
    }

    /// Run yt-dlp with options only, for actions that take no URL.
    pub fn run_standalone(&self, opts: &Options) -> Result<Completed> {
        self.execute(build_args(opts))
    }

    /// Download the best available video+audio.
    pub fn download_best(
        &self,
        targets: impl Into<Targets>,
        preset: BestQuality,
        extra: Options,
    ) -> Result<Option<Completed>> {
        tracing::info!(?preset, "best quality download");
        self.run(targets, &Options::from(preset).merge(extra))
    }

    /// Download and extract audio.
    pub fn download_audio_only(
        &self,
        targets: impl Into<Targets>,
        preset: AudioOnly,
        extra: Options,
    ) -> Result<Option<Completed>> {
        tracing::info!(?preset, "audio-only download");
        self.run(targets, &Options::from(preset).merge(extra))
    }

    /// Download a specific format code (see [`YtDlp::list_formats`]).
    pub fn download_specific_format(
        &self,
        targets: impl Into<Targets>,
        preset: SpecificFormat,
        extra: Options,
    ) -> Result<Option<Completed>> {
        tracing::info!(?preset, "specific format download");
        self.run(targets, &Options::from(preset).merge(extra))
    }

    /// List available formats for a single URL.
    pub fn list_formats(&self, url: &str) -> Result<Option<Completed>> {
        self.run(url, &ListFormats.into())
    }

    /// Self-update the yt-dlp executable.
    pub fn update(&self) -> Result<Completed> {
        tracing::info!(program = %self.program.display(), "updating yt-dlp");
        self.run_standalone(&SelfUpdate.into())
    }

    fn execute(&self, args: Vec<String>) -> Result<Completed> {
        tracing::debug!(program = %self.program.display(), ?args, "spawning yt-dlp");

        if self.echo {
            println!("--- Executing Command ---");
            println!("{}", command_line(&self.program, &args));
            println!("{RULE}");
            println!("--- yt-dlp Output -----");
        }

        let mut command = Command::new(&self.program);
        command.args(&args);

        let (status, stdout, stderr) = if self.capture {
            let Output {
                status,
                stdout,
                stderr,
            } = command.output().map_err(|e| self.spawn_error(e))?;

            (
                status,
                Some(String::from_utf8_lossy(&stdout).into_owned()),
                Some(String::from_utf8_lossy(&stderr).into_owned()),
            )
        } else {
            let status = command.status().map_err(|e| self.spawn_error(e))?;
            (status, None, None)
        };

        if !status.success() {
            let code = status.code();
            match code {
                Some(code) => tracing::error!(code, "yt-dlp exited with non-zero status"),
                None => tracing::error!("yt-dlp terminated by signal"),
            }
            return Err(Error::Exit {
                code,
                stdout,
                stderr,
            });
        }

        if self.echo {
            println!("{RULE}");
            println!("yt-dlp finished successfully.");
        }

        Ok(Completed {
            code: status.code().unwrap_or_default(),
            stdout,
            stderr,
        })
    }

    fn spawn_error(&self, e: std::io::Error) -> Error {
        if e.kind() == ErrorKind::NotFound {
            Error::ExecutableNotFound {
                program: self.program.clone(),
            }
        } else {
            Error::Spawn(e)
        }
    }
}

/// Human-readable command line; tokens containing spaces are double-quoted.
///
/// Not shell-safe, for display only.
pub fn command_line(program: &Path, args: &[String]) -> String {
    std::iter::once(program.to_string_lossy().into_owned())
        .chain(args.iter().cloned())
        .map(|arg| {
            if arg.contains(' ') {
                format!("\"{arg}\"")
            } else {
                arg
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
