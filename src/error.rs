//! Error types for configuration parsing, store access, and startup.
//!
//! None of these ever reach an HTTP client: request-time store failures are
//! logged by the redirect handler and the request falls through to the next
//! handler in the chain.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to turn YAML or JSON bytes into path/url pairs.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported pair format '{0}' (expected 'yaml' or 'json')")]
    UnsupportedFormat(String),
}

/// Failure while opening or accessing the durable redirect store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("timed out after {timeout:?} waiting for store lock on {}", path.display())]
    OpenTimeout { path: PathBuf, timeout: Duration },

    #[error("transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit failed: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("invalid pair at index {index}: {reason}")]
    InvalidPair { index: usize, reason: &'static str },

    #[error("stored url for '{path}' is not valid UTF-8")]
    InvalidValue { path: String },

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Errors raised while loading configuration files and seeding the store.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Returns true if this error is a missing configuration file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
