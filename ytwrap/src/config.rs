//! Extra yt-dlp options from the command line and JSON files.
//!
//! `OptionArgs` holds the raw clap input; `TryFrom<OptionArgs> for Options`
//! resolves it. File options apply first, then `--opt` entries.

use eyre::{Context, Result, bail, eyre};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use ytwrap_dl::options::{OptionValue, Options};

/// Raw extra-option arguments shared by download subcommands.
#[derive(clap::Args, Debug, Default)]
pub struct OptionArgs {
    /// Extra yt-dlp option as KEY or KEY=VALUE; repeating a key with values builds a list
    ///
    /// VALUE `true`/`false` sets or clears the flag. To pass those words as a
    /// literal value, use a JSON string in --options-file instead.
    #[arg(short = 'O', long = "opt", value_name = "KEY[=VALUE]")]
    pub opts: Vec<OptPair>,

    /// JSON object of yt-dlp options (applied before --opt)
    #[arg(long, value_name = "JSON")]
    pub options_file: Option<PathBuf>,
}

/// Single `KEY[=VALUE]` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptPair {
    pub key: String,
    pub value: Option<String>,
}

impl FromStr for OptPair {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (key, value) = match s.split_once('=') {
            Some((key, value)) => (key, Some(value.to_string())),
            None => (s, None),
        };

        let key = key.trim().trim_start_matches('-');
        if key.is_empty() {
            return Err(format!("missing option name in {s:?}"));
        }

        Ok(Self {
            key: key.to_string(),
            value,
        })
    }
}

impl TryFrom<OptionArgs> for Options {
    type Error = eyre::Error;

    fn try_from(args: OptionArgs) -> Result<Self> {
        let base = match args.options_file.as_deref() {
            Some(path) => read_options_file(path)?,
            None => Options::new(),
        };

        Ok(base.merge(collect_pairs(args.opts)))
    }
}

/// Fold `--opt` pairs: a bare key or `true`/`false` is a flag, repeated values form a list.
///
/// Keys spelled with `_` or `-` are the same option.
pub fn collect_pairs(pairs: Vec<OptPair>) -> Options {
    let mut opts = Options::new();

    for OptPair { key, value } in pairs {
        let value = match value {
            None => OptionValue::Flag(true),
            Some(v) if v == "true" => OptionValue::Flag(true),
            Some(v) if v == "false" => OptionValue::Flag(false),
            Some(v) => match opts.get(&key) {
                Some(OptionValue::Value(prev)) => OptionValue::List(vec![prev.clone(), v]),
                Some(OptionValue::List(items)) => {
                    OptionValue::List(items.iter().cloned().chain([v]).collect())
                }
                _ => OptionValue::Value(v),
            },
        };
        opts.insert(key, value);
    }

    opts
}

/// Load an option mapping from a JSON object file.
pub fn read_options_file(path: &Path) -> Result<Options> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read options file: {:?}", path.display()))?;

    let value: Value = serde_json::from_str(&text)
        .wrap_err_with(|| format!("invalid JSON in options file: {:?}", path.display()))?;

    let opts = options_from_json(value)?;
    tracing::debug!(path = ?path.display(), count = opts.len(), "loaded options file");

    Ok(opts)
}

/// Translate a JSON object into options, keeping member order.
pub fn options_from_json(value: Value) -> Result<Options> {
    let Value::Object(map) = value else {
        bail!("options file must contain a JSON object");
    };

    map.into_iter()
        .map(|(key, value)| {
            let value = json_to_option(value).wrap_err_with(|| format!("option {key:?}"))?;
            Ok((key, value))
        })
        .collect()
}

fn json_to_option(value: Value) -> Result<OptionValue> {
    match value {
        Value::Bool(flag) => Ok(OptionValue::Flag(flag)),
        Value::Array(items) => items
            .into_iter()
            .map(json_to_scalar)
            .collect::<Result<Vec<_>>>()
            .map(OptionValue::List),
        other => json_to_scalar(other).map(OptionValue::Value),
    }
}

fn json_to_scalar(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(eyre!("unsupported value: {other}")),
    }
}
