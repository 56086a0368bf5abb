//! Download subcommands - map CLI arguments onto presets and run yt-dlp.

use crate::config::OptionArgs;
use eyre::Result;
use std::path::PathBuf;
use ytwrap_dl::dl::{Completed, YtDlp};
use ytwrap_dl::options::Options;
use ytwrap_dl::presets::{AudioOnly, BestQuality, SpecificFormat};

/// CLI arguments shared by download subcommands.
#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// URLs to download
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Output path or template; a trailing separator names a directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// CLI arguments for audio extraction.
#[derive(clap::Args, Debug)]
pub struct AudioArgs {
    #[command(flatten)]
    pub download: DownloadArgs,

    /// Target audio codec (mp3, m4a, opus, ...)
    #[arg(long, default_value = "mp3")]
    pub audio_format: String,

    /// VBR quality 0 (best) to 10 (worst), or a bitrate such as 128K
    #[arg(long, default_value = "5")]
    pub audio_quality: String,
}

/// CLI arguments for a specific format code.
#[derive(clap::Args, Debug)]
pub struct FormatArgs {
    /// Format code as listed by `ytw formats`
    pub code: String,

    #[command(flatten)]
    pub download: DownloadArgs,
}

/// CLI arguments for a run with user options only.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// URLs to process (none: nothing is run)
    pub urls: Vec<String>,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Resolved configuration for a download.
#[derive(Debug)]
pub struct Config {
    pub urls: Vec<String>,
    pub output: Option<PathBuf>,
    pub extra: Options,
}

impl TryFrom<DownloadArgs> for Config {
    type Error = eyre::Error;

    fn try_from(args: DownloadArgs) -> Result<Self> {
        Ok(Self {
            urls: args.urls,
            output: args.output,
            extra: args.options.try_into()?,
        })
    }
}

impl TryFrom<RunArgs> for Config {
    type Error = eyre::Error;

    fn try_from(args: RunArgs) -> Result<Self> {
        Ok(Self {
            urls: args.urls,
            output: None,
            extra: args.options.try_into()?,
        })
    }
}

/// Resolved configuration for audio extraction.
#[derive(Debug)]
pub struct AudioConfig {
    pub download: Config,
    pub preset: AudioOnly,
}

impl TryFrom<AudioArgs> for AudioConfig {
    type Error = eyre::Error;

    fn try_from(args: AudioArgs) -> Result<Self> {
        let download = Config::try_from(args.download)?;
        let preset = AudioOnly {
            audio_format: args.audio_format,
            audio_quality: args.audio_quality,
            output: download.output.clone(),
        };
        Ok(Self { download, preset })
    }
}

/// Resolved configuration for a specific format code.
#[derive(Debug)]
pub struct FormatConfig {
    pub download: Config,
    pub preset: SpecificFormat,
}

impl TryFrom<FormatArgs> for FormatConfig {
    type Error = eyre::Error;

    fn try_from(args: FormatArgs) -> Result<Self> {
        let download = Config::try_from(args.download)?;
        let preset = SpecificFormat {
            format_code: args.code,
            output: download.output.clone(),
        };
        Ok(Self { download, preset })
    }
}

pub fn best(ytdlp: &YtDlp, config: Config) -> Result<()> {
    tracing::info!(urls = ?config.urls, "downloading best quality");

    let preset = BestQuality {
        output: config.output,
    };
    finish(ytdlp.download_best(config.urls, preset, config.extra))
}

pub fn audio(ytdlp: &YtDlp, config: AudioConfig) -> Result<()> {
    let AudioConfig { download, preset } = config;
    tracing::info!(urls = ?download.urls, format = preset.audio_format, "extracting audio");

    finish(ytdlp.download_audio_only(download.urls, preset, download.extra))
}

pub fn format(ytdlp: &YtDlp, config: FormatConfig) -> Result<()> {
    let FormatConfig { download, preset } = config;
    tracing::info!(urls = ?download.urls, code = preset.format_code, "downloading format");

    finish(ytdlp.download_specific_format(download.urls, preset, download.extra))
}

pub fn run(ytdlp: &YtDlp, config: Config) -> Result<()> {
    finish(ytdlp.run(config.urls, &config.extra))
}

/// Replay captured output, including on failure, then convert the result.
pub fn finish(result: ytwrap_dl::Result<Option<Completed>>) -> Result<()> {
    match &result {
        Ok(Some(Completed { stdout, stderr, .. }))
        | Err(ytwrap_dl::Error::Exit { stdout, stderr, .. }) => {
            replay(stdout.as_deref(), stderr.as_deref())
        }
        _ => {}
    }

    result?;
    Ok(())
}

fn replay(stdout: Option<&str>, stderr: Option<&str>) {
    if let Some(out) = stdout {
        print!("{out}");
    }
    if let Some(err) = stderr {
        eprint!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptPair;
    use ytwrap_dl::options::build_args;

    fn download_args(opts: &[&str]) -> DownloadArgs {
        DownloadArgs {
            urls: vec!["https://a".to_string()],
            output: Some(PathBuf::from("music/track.mp3")),
            options: OptionArgs {
                opts: opts.iter().map(|s| s.parse::<OptPair>().unwrap()).collect(),
                options_file: None,
            },
        }
    }

    #[test]
    fn audio_config_carries_output_into_preset() {
        let args = AudioArgs {
            download: download_args(&["embed_thumbnail"]),
            audio_format: "opus".to_string(),
            audio_quality: "0".to_string(),
        };

        let config = AudioConfig::try_from(args).unwrap();

        assert_eq!(config.preset.audio_format, "opus");
        assert_eq!(config.preset.audio_quality, "0");
        assert_eq!(config.preset.output, Some(PathBuf::from("music/track.mp3")));
        assert_eq!(config.download.extra.len(), 1);
    }

    #[test]
    fn opt_false_switches_off_audio_preset_flag() {
        let args = AudioArgs {
            download: download_args(&["extract_audio=false", "audio_format=opus"]),
            audio_format: "mp3".to_string(),
            audio_quality: "5".to_string(),
        };
        let AudioConfig { download, preset } = AudioConfig::try_from(args).unwrap();

        let args = build_args(&Options::from(preset).merge(download.extra));

        assert!(!args.iter().any(|a| a == "--extract-audio"));
        assert_eq!(args.iter().filter(|a| *a == "--audio-format").count(), 1);
        assert_eq!(args[0..2], ["--audio-format", "opus"]);
    }

    #[test]
    fn format_config_uses_code() {
        let args = FormatArgs {
            code: "137+140".to_string(),
            download: download_args(&[]),
        };

        let config = FormatConfig::try_from(args).unwrap();

        assert_eq!(config.preset.format_code, "137+140");
        assert!(config.download.extra.is_empty());
    }

    #[test]
    fn finish_passes_through_success_and_skip() {
        assert!(finish(Ok(None)).is_ok());
        assert!(finish(Ok(Some(Completed::default()))).is_ok());
    }

    #[test]
    fn finish_keeps_exit_error() {
        let err = finish(Err(ytwrap_dl::Error::Exit {
            code: Some(1),
            stdout: Some(String::new()),
            stderr: Some("ERROR: boom\n".to_string()),
        }))
        .unwrap_err();

        assert_eq!(crate::cli::failure_exit_code(&err), Some(1));
    }
}
