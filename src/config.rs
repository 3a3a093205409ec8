//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export STORE_PATH="my.db"
//! export STORE_OPEN_TIMEOUT_MS="1000"
//! export SEED_FILE="conf.yaml"
//! export PATHS_FILE="paths.json"
//! ```
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `STORE_ENABLED` - Put the durable store first in the chain (default: `true`)
//! - `STORE_PATH` - redb file, created if absent (default: `my.db`)
//! - `STORE_OPEN_TIMEOUT_MS` - How long to wait for the store file lock (default: 1000)
//! - `SEED_FILE` / `SEED_FORMAT` - Pairs upserted into the store at startup and on `SIGHUP`
//! - `PATHS_FILE` / `PATHS_FORMAT` - Pairs served from memory after the store
//!
//! Formats are `yaml` or `json`; when unset they are inferred from the file
//! extension.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::parser::{Format, PairFile};
use crate::infrastructure::persistence::default_store_path;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When false, only in-memory sources are consulted and the store file
    /// is never opened.
    pub store_enabled: bool,
    pub store_path: PathBuf,
    /// Connect timeout for the store file lock in milliseconds.
    pub store_open_timeout_ms: u64,
    pub seed_file: Option<PathBuf>,
    pub seed_format: Option<Format>,
    pub paths_file: Option<PathBuf>,
    pub paths_format: Option<Format>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_ENABLED`, `STORE_OPEN_TIMEOUT_MS` or a
    /// format variable holds a value that does not parse.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let store_enabled = match env::var("STORE_ENABLED") {
            Ok(v) => parse_flag(&v).context("Invalid STORE_ENABLED")?,
            Err(_) => true,
        };

        let store_path = env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_store_path());

        let store_open_timeout_ms = store_open_timeout_ms_from_env()?;

        let seed_file = env::var("SEED_FILE").ok().map(PathBuf::from);
        let seed_format = Self::load_format("SEED_FORMAT")?;

        let paths_file = env::var("PATHS_FILE").ok().map(PathBuf::from);
        let paths_format = Self::load_format("PATHS_FORMAT")?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            store_enabled,
            store_path,
            store_open_timeout_ms,
            seed_file,
            seed_format,
            paths_file,
            paths_format,
        })
    }

    fn load_format(var: &str) -> Result<Option<Format>> {
        env::var(var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| v.parse::<Format>())
            .transpose()
            .with_context(|| format!("Invalid {}", var))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `store_open_timeout_ms` is 0
    /// - a configured pair file has no usable format
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_open_timeout_ms == 0 {
            anyhow::bail!("STORE_OPEN_TIMEOUT_MS must be greater than 0");
        }

        if self.seed_file.is_some() && !self.store_enabled {
            anyhow::bail!("SEED_FILE requires STORE_ENABLED=true");
        }

        self.seed_source().context("Invalid SEED_FILE")?;
        self.paths_source().context("Invalid PATHS_FILE")?;

        Ok(())
    }

    pub fn store_open_timeout(&self) -> Duration {
        Duration::from_millis(self.store_open_timeout_ms)
    }

    /// Seed file with its resolved format.
    pub fn seed_source(&self) -> Result<Option<PairFile>> {
        Ok(self
            .seed_file
            .as_ref()
            .map(|path| PairFile::detect(path, self.seed_format))
            .transpose()?)
    }

    /// In-memory paths file with its resolved format.
    pub fn paths_source(&self) -> Result<Option<PairFile>> {
        Ok(self
            .paths_file
            .as_ref()
            .map(|path| PairFile::detect(path, self.paths_format))
            .transpose()?)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if self.store_enabled {
            tracing::info!(
                "  Store: {} (timeout {}ms)",
                self.store_path.display(),
                self.store_open_timeout_ms
            );
        } else {
            tracing::info!("  Store: disabled");
        }

        match &self.seed_file {
            Some(path) => tracing::info!("  Seed file: {}", path.display()),
            None => tracing::info!("  Seed file: none"),
        }
        match &self.paths_file {
            Some(path) => tracing::info!("  Paths file: {}", path.display()),
            None => tracing::info!("  Paths file: none"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses a boolean flag: `true`/`false`, `1`/`0`, case-insensitive.
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => anyhow::bail!("expected 'true' or 'false', got '{}'", other),
    }
}

/// Reads `STORE_OPEN_TIMEOUT_MS`, defaulting to 1000 when unset.
///
/// # Errors
///
/// Returns an error if the variable is set but is not a whole number.
pub fn store_open_timeout_ms_from_env() -> Result<u64> {
    match env::var("STORE_OPEN_TIMEOUT_MS") {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("Invalid STORE_OPEN_TIMEOUT_MS '{}'", v)),
        Err(_) => Ok(1000),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
