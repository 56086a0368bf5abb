//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use color_eyre::Section;
use eyre::{Report, Result};
use std::path::PathBuf;
use ytwrap_dl::dl::YtDlp;

#[derive(Debug, Parser)]
#[command(name = "ytw")]
#[command(about = "Download presets and option translation for yt-dlp")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    /// yt-dlp executable (default: search PATH)
    #[arg(long = "yt-dlp", env = "YTW_YT_DLP", global = true, value_name = "PATH")]
    pub yt_dlp: Option<PathBuf>,

    /// Do not print the assembled command line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Buffer yt-dlp output and print it after the process exits
    #[arg(long, global = true)]
    pub capture: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download the best available video+audio
    Best(crate::dl::DownloadArgs),

    /// Download and extract audio
    Audio(crate::dl::AudioArgs),

    /// Download a specific format code (see `formats`)
    Format(crate::dl::FormatArgs),

    /// Run yt-dlp with only the given options
    Run(crate::dl::RunArgs),

    /// List available formats for a URL
    Formats {
        /// URL to inspect
        url: String,
    },

    /// Update the yt-dlp executable
    Update,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    let ytdlp = YtDlp::locate_from(cli.global.yt_dlp.as_deref())
        .suggestion("install yt-dlp (`pip install -U yt-dlp`) or pass --yt-dlp <PATH>")?
        .with_echo(!cli.global.quiet)
        .with_capture(cli.global.capture);

    match cli.command {
        Commands::Best(args) => crate::dl::best(&ytdlp, args.try_into()?),
        Commands::Audio(args) => crate::dl::audio(&ytdlp, args.try_into()?),
        Commands::Format(args) => crate::dl::format(&ytdlp, args.try_into()?),
        Commands::Run(args) => crate::dl::run(&ytdlp, args.try_into()?),
        Commands::Formats { url } => crate::dl::finish(ytdlp.list_formats(&url)),
        Commands::Update => {
            println!("Attempting to update yt-dlp...");
            crate::dl::finish(ytdlp.update().map(Some))
        }
    }
}

/// Process exit code for a failed yt-dlp run, `None` for any other error.
///
/// Codes that do not fit a process exit status collapse to `1`.
pub fn failure_exit_code(report: &Report) -> Option<u8> {
    match report.downcast_ref::<ytwrap_dl::Error>()? {
        ytwrap_dl::Error::Exit { code, .. } => Some(
            code.and_then(|c| u8::try_from(c).ok())
                .filter(|c| *c != 0)
                .unwrap_or(1),
        ),
        _ => None,
    }
}
