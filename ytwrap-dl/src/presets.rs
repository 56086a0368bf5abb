//! Preset option mappings for common yt-dlp tasks.
//!
//! Each preset converts into [`Options`]; caller overrides are merged on top via
//! [`Options::merge`], so an override replaces the preset's value for the same key.
//!
//! ```no_run
//! use ytwrap_dl::dl::YtDlp;
//! use ytwrap_dl::options::Options;
//! use ytwrap_dl::presets::AudioOnly;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let preset = AudioOnly {
//!     audio_quality: "2".to_string(),
//!     output: Some("~/Downloads/MyAudio_%(title)s.%(ext)s".into()),
//!     ..Default::default()
//! };
//! let extra = Options::new().with("embed_thumbnail", true);
//!
//! YtDlp::locate()?.download_audio_only("https://youtube.com/watch?v=example", preset, extra)?;
//! # Ok(())
//! # }
//! ```

use crate::options::Options;
use std::path::{Path, PathBuf, is_separator};

/// Format selector for the best video merged with the best audio.
pub const BEST_FORMAT: &str = "bestvideo+bestaudio/best";

/// Format selector for the best audio stream.
pub const BEST_AUDIO_FORMAT: &str = "bestaudio/best";

/// Output template used when the output path names no file.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";

const DEFAULT_STEM: &str = "%(title)s [%(id)s]";

/// Output location split into yt-dlp's `--paths` and `--output`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    /// Directory for `--paths`
    pub dir: String,
    /// File name or template for `--output`; `None` when the path names a directory
    pub file_name: Option<String>,
}

impl OutputPath {
    /// Split `path` into directory and file name.
    ///
    /// A bare file name gets `.` as directory. A trailing separator means the
    /// whole path is the directory.
    pub fn split(path: &Path) -> Self {
        let raw = path.to_string_lossy();

        if raw.ends_with(is_separator) {
            let trimmed = raw.trim_end_matches(is_separator);
            let dir = if trimmed.is_empty() { &raw[..1] } else { trimmed };
            return Self {
                dir: dir.to_string(),
                file_name: None,
            };
        }

        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        Self { dir, file_name }
    }

    /// `--output` value, falling back to [`DEFAULT_OUTPUT_TEMPLATE`].
    pub fn template(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_TEMPLATE.to_string())
    }

    /// `--output` value with the extension left to yt-dlp: `<stem>.%(ext)s`.
    pub fn audio_template(&self) -> String {
        let stem = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| DEFAULT_STEM.to_string());

        format!("{stem}.%(ext)s")
    }

    fn apply(&self, opts: &mut Options, template: String) {
        opts.insert("paths", self.dir.as_str());
        opts.insert("output", template);
    }
}

/// Best available video+audio.
#[derive(Clone, Debug, Default)]
pub struct BestQuality {
    pub output: Option<PathBuf>,
}

impl From<BestQuality> for Options {
    fn from(preset: BestQuality) -> Self {
        let mut opts = Options::new().with("format", BEST_FORMAT);

        if let Some(path) = preset.output.as_deref() {
            let out = OutputPath::split(path);
            out.apply(&mut opts, out.template());
        }

        opts
    }
}

/// Audio extraction via yt-dlp's ffmpeg post-processor.
#[derive(Clone, Debug)]
pub struct AudioOnly {
    /// Target codec (`mp3`, `m4a`, `opus`, ...)
    pub audio_format: String,
    /// VBR quality `0` (best) to `10` (worst), or a bitrate such as `128K`
    pub audio_quality: String,
    pub output: Option<PathBuf>,
}

impl Default for AudioOnly {
    fn default() -> Self {
        Self {
            audio_format: "mp3".to_string(),
            audio_quality: "5".to_string(),
            output: None,
        }
    }
}

impl From<AudioOnly> for Options {
    fn from(preset: AudioOnly) -> Self {
        let mut opts = Options::new()
            .with("extract-audio", true)
            .with("audio-format", preset.audio_format)
            .with("audio-quality", preset.audio_quality)
            .with("format", BEST_AUDIO_FORMAT)
            .with("keep-video", false);

        if let Some(path) = preset.output.as_deref() {
            let out = OutputPath::split(path);
            out.apply(&mut opts, out.audio_template());
        }

        opts
    }
}

/// A specific format code, as shown by [`ListFormats`].
#[derive(Clone, Debug)]
pub struct SpecificFormat {
    pub format_code: String,
    pub output: Option<PathBuf>,
}

impl SpecificFormat {
    pub fn new(format_code: impl Into<String>) -> Self {
        Self {
            format_code: format_code.into(),
            output: None,
        }
    }
}

impl From<SpecificFormat> for Options {
    fn from(preset: SpecificFormat) -> Self {
        let mut opts = Options::new().with("format", preset.format_code);

        if let Some(path) = preset.output.as_deref() {
            let out = OutputPath::split(path);
            out.apply(&mut opts, out.template());
        }

        opts
    }
}

/// List available formats without downloading.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListFormats;

impl From<ListFormats> for Options {
    fn from(_: ListFormats) -> Self {
        Options::new().with("list-formats", true)
    }
}

/// yt-dlp self-update; takes no URL.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelfUpdate;

impl From<SelfUpdate> for Options {
    fn from(_: SelfUpdate) -> Self {
        Options::new().with("update", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OptionValue, build_args};

    #[test]
    fn split_nested_path() {
        let out = OutputPath::split(Path::new("~/Downloads/MyVideo_%(title)s.%(ext)s"));

        assert_eq!(out.dir, "~/Downloads");
        assert_eq!(out.file_name.as_deref(), Some("MyVideo_%(title)s.%(ext)s"));
    }

    #[test]
    fn split_bare_file_name_uses_current_dir() {
        let out = OutputPath::split(Path::new("clip.mp4"));

        assert_eq!(out.dir, ".");
        assert_eq!(out.template(), "clip.mp4");
    }

    #[test]
    fn split_trailing_separator_is_directory() {
        let out = OutputPath::split(Path::new("videos/"));

        assert_eq!(out.dir, "videos");
        assert_eq!(out.file_name, None);
        assert_eq!(out.template(), DEFAULT_OUTPUT_TEMPLATE);
    }

    #[test]
    fn split_root() {
        let out = OutputPath::split(Path::new("/"));
        assert_eq!(out.dir, "/");
        assert_eq!(out.template(), DEFAULT_OUTPUT_TEMPLATE);
    }

    #[test]
    fn audio_template_replaces_extension() {
        let out = OutputPath::split(Path::new("music/song.mp3"));
        assert_eq!(out.audio_template(), "song.%(ext)s");

        let out = OutputPath::split(Path::new("music/MyAudio_%(title)s.%(ext)s"));
        assert_eq!(out.audio_template(), "MyAudio_%(title)s.%(ext)s");

        let out = OutputPath::split(Path::new("music/"));
        assert_eq!(out.audio_template(), "%(title)s [%(id)s].%(ext)s");
    }

    #[test]
    fn best_quality_without_output() {
        let opts: Options = BestQuality::default().into();
        assert_eq!(build_args(&opts), ["--format", BEST_FORMAT]);
    }

    #[test]
    fn best_quality_with_output() {
        let opts: Options = BestQuality {
            output: Some(PathBuf::from("out/%(title)s.%(ext)s")),
        }
        .into();

        assert_eq!(
            build_args(&opts),
            [
                "--format",
                BEST_FORMAT,
                "--paths",
                "out",
                "--output",
                "%(title)s.%(ext)s"
            ]
        );
    }

    #[test]
    fn audio_only_defaults() {
        let opts: Options = AudioOnly::default().into();

        assert_eq!(
            build_args(&opts),
            [
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "5",
                "--format",
                BEST_AUDIO_FORMAT,
            ]
        );
        assert_eq!(opts.get("keep-video"), Some(&OptionValue::Flag(false)));
    }

    #[test]
    fn audio_only_override_keeps_position() {
        let opts = Options::from(AudioOnly::default())
            .merge(Options::new().with("keep-video", true).with("audio-format", "opus"));

        assert_eq!(
            build_args(&opts),
            [
                "--extract-audio",
                "--audio-format",
                "opus",
                "--audio-quality",
                "5",
                "--format",
                BEST_AUDIO_FORMAT,
                "--keep-video",
            ]
        );
    }

    #[test]
    fn audio_only_underscore_override_replaces_preset_key() {
        let opts = Options::from(AudioOnly::default()).merge(
            Options::new()
                .with("extract_audio", false)
                .with("audio_format", "opus"),
        );

        assert_eq!(
            build_args(&opts),
            [
                "--audio-format",
                "opus",
                "--audio-quality",
                "5",
                "--format",
                BEST_AUDIO_FORMAT,
            ]
        );
    }

    #[test]
    fn specific_format() {
        let preset = SpecificFormat {
            output: Some(PathBuf::from("dl/")),
            ..SpecificFormat::new("22")
        };
        let opts: Options = preset.into();

        assert_eq!(
            build_args(&opts),
            [
                "--format",
                "22",
                "--paths",
                "dl",
                "--output",
                DEFAULT_OUTPUT_TEMPLATE
            ]
        );
    }

    #[test]
    fn list_formats_and_update() {
        assert_eq!(build_args(&ListFormats.into()), ["--list-formats"]);
        assert_eq!(build_args(&SelfUpdate.into()), ["--update"]);
    }
}
