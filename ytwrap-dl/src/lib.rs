//! Thin Rust wrapper around the [yt-dlp](https://github.com/yt-dlp/yt-dlp) executable.
//!
//! ## Modules
//!
//! - [`options`] - Option mapping and translation to command-line tokens
//! - [`dl`] - Executable resolution and subprocess invocation
//! - [`presets`] - Option mappings for common tasks
//! - [`error`] - Error types
//!
//! ## Quick Start
//!
//! **Preset** (best video+audio into a directory):
//! ```no_run
//! use ytwrap_dl::dl::YtDlp;
//! use ytwrap_dl::options::Options;
//! use ytwrap_dl::presets::BestQuality;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let preset = BestQuality {
//!     output: Some("downloads/".into()),
//! };
//! YtDlp::locate()?.download_best("https://youtube.com/watch?v=example", preset, Options::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! **Custom options**:
//! ```no_run
//! use ytwrap_dl::dl::YtDlp;
//! use ytwrap_dl::options::Options;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = Options::new()
//!     .with("output", "~/Downloads/%(uploader)s_%(title)s.%(ext)s")
//!     .with("write_thumbnail", true)
//!     .with("ignore_errors", true)
//!     .with("limit_rate", "1M");
//!
//! YtDlp::locate()?.run(vec!["https://youtube.com/watch?v=a", "https://vimeo.com/1"], &opts)?;
//! # Ok(())
//! # }
//! ```

pub mod dl;
pub mod error;
pub mod options;
pub mod presets;

pub use error::{Error, Result};
