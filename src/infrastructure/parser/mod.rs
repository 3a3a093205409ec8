//! Pair Parser: YAML/JSON bytes into an ordered sequence of path/url pairs.
//!
//! # Formats
//!
//! YAML, a sequence of objects:
//!
//! ```yaml
//! - path: /urlshort
//!   url: https://github.com/gophercises/urlshort
//! ```
//!
//! JSON, an object with a single `PathUrl` array:
//!
//! ```json
//! { "PathUrl": [ { "path": "/urlshort", "url": "https://github.com/gophercises/urlshort" } ] }
//! ```
//!
//! Pairs come back in source order with duplicates preserved. Any structural
//! or type error fails the whole parse; no partial results are returned.

mod json;
mod yaml;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::entities::PathUrlPair;
use crate::error::{AppError, ParseError};

/// Declared format of a pair source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Infers the format from a file extension (`yaml`, `yml`, `json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ParseError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Parses raw bytes in the given format.
///
/// # Errors
///
/// Returns [`ParseError`] on malformed input, wrong field names or types,
/// or invalid UTF-8.
pub fn parse(bytes: &[u8], format: Format) -> Result<Vec<PathUrlPair>, ParseError> {
    match format {
        Format::Yaml => yaml::parse(bytes),
        Format::Json => json::parse(bytes),
    }
}

/// A configuration file holding path/url pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFile {
    pub path: PathBuf,
    pub format: Format,
}

impl PairFile {
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Creates a pair file, taking the format from `format` if given and
    /// from the file extension otherwise.
    pub fn detect(path: impl Into<PathBuf>, format: Option<Format>) -> Result<Self, ParseError> {
        let path = path.into();
        let format = match format {
            Some(format) => format,
            None => Format::from_path(&path).ok_or_else(|| {
                ParseError::UnsupportedFormat(path.display().to_string())
            })?,
        };
        Ok(Self { path, format })
    }

    /// Reads the whole file and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the file cannot be read and
    /// [`AppError::Parse`] if its content is malformed.
    pub async fn load(&self) -> Result<Vec<PathUrlPair>, AppError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| AppError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(parse(&bytes, self.format)?)
    }
}
