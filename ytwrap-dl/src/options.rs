//! Option mapping and its translation to yt-dlp command-line tokens.
//!
//! ```
//! use ytwrap_dl::options::{Options, build_args};
//!
//! let opts = Options::new()
//!     .with("format", "bestaudio")
//!     .with("write_thumbnail", true)
//!     .with("sub_langs", vec!["en", "de"]);
//!
//! assert_eq!(
//!     build_args(&opts),
//!     ["--format", "bestaudio", "--write-thumbnail", "--sub-langs", "en", "--sub-langs", "de"]
//! );
//! ```

/// Value of a single yt-dlp option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// Emit the bare flag when `true`, nothing when `false`
    Flag(bool),
    /// Emit the flag followed by the value
    Value(String),
    /// Emit the flag once per element, each followed by the element
    List(Vec<String>),
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(value: $t) -> Self {
                    Self::Value(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T: ToString> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.iter().map(ToString::to_string).collect())
    }
}

/// Ordered option mapping.
///
/// Iteration order is argument order. Keys are matched by their flag name, so
/// `keep_video`, `keep-video` and `--keep-video` name the same entry, and
/// re-inserting an existing key replaces the value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options(Vec<(String, OptionValue)>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Option<OptionValue> {
        let key = key.into();
        let value = value.into();

        match self.position(&key).map(|i| &mut self.0[i]) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`Options::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Apply `overrides` on top of `self`; colliding keys take the override's value.
    pub fn merge(mut self, overrides: Options) -> Self {
        for (key, value) in overrides.0 {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.position(key).map(|i| &self.0[i].1)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let index = self.position(key)?;
        Some(self.0.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        let flag = flag_name(key);
        self.0.iter().position(|(k, _)| flag_name(k) == flag)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut opts = Options::new();
        for (key, value) in iter {
            opts.insert(key, value);
        }
        opts
    }
}

impl<K: Into<String>, V: Into<OptionValue>> Extend<(K, V)> for Options {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Convert an option key to its long flag: `write_info_json` -> `--write-info-json`.
pub fn flag_name(key: &str) -> String {
    let name = key.replace('_', "-");
    if name.starts_with("--") {
        name
    } else {
        format!("--{name}")
    }
}

/// Translate an option mapping into a flat token list.
pub fn build_args(opts: &Options) -> Vec<String> {
    let mut args = Vec::new();

    for (key, value) in opts.iter() {
        let flag = flag_name(key);
        match value {
            OptionValue::Flag(true) => args.push(flag),
            OptionValue::Flag(false) => {}
            OptionValue::Value(v) => {
                args.push(flag);
                args.push(v.clone());
            }
            OptionValue::List(items) => {
                for item in items {
                    args.push(flag.clone());
                    args.push(item.clone());
                }
            }
        }
    }

    args
}

/// Ordered resource identifiers (URLs) passed after all options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Targets(Vec<String>);

impl Targets {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether any identifier starts with `-` and needs a `--` separator
    /// to reach yt-dlp as a positional target (e.g. video ID `-wtIMTCHWuI`).
    pub fn needs_separator(&self) -> bool {
        self.0.iter().any(|target| target.starts_with('-'))
    }
}

impl From<&str> for Targets {
    fn from(url: &str) -> Self {
        Self(vec![url.to_string()])
    }
}

impl From<String> for Targets {
    fn from(url: String) -> Self {
        Self(vec![url])
    }
}

impl From<&String> for Targets {
    fn from(url: &String) -> Self {
        Self(vec![url.clone()])
    }
}

impl<T: AsRef<str>> From<Vec<T>> for Targets {
    fn from(urls: Vec<T>) -> Self {
        urls.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>> From<&[T]> for Targets {
    fn from(urls: &[T]) -> Self {
        urls.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>, const N: usize> From<&[T; N]> for Targets {
    fn from(urls: &[T; N]) -> Self {
        urls.iter().map(AsRef::as_ref).collect()
    }
}

impl<'a> FromIterator<&'a str> for Targets {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl IntoIterator for Targets {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
