//! redb implementation of the redirect repository.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redb::{Database, DatabaseError, ReadableTable, TableDefinition, TableError, WriteTransaction};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::entities::PathUrlPair;
use crate::domain::repositories::RedirectRepository;
use crate::domain::resolver::PathResolver;
use crate::error::StoreError;

/// Bucket holding `path -> url` with the url stored as raw bytes.
pub const REDIRECT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("PathRedirect");

const OPEN_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Single-file embedded store for redirects.
///
/// redb gives snapshot-isolated readers that never block on the single
/// writer. All blocking calls run on the tokio blocking pool.
///
/// The database file is closed when the last clone of the inner handle is
/// dropped.
#[derive(Clone)]
pub struct RedbRedirectRepository {
    db: Arc<Database>,
}

impl RedbRedirectRepository {
    /// Opens the store at `path`, creating the file if it does not exist.
    ///
    /// If the file is held by another process, retries until `timeout`
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OpenTimeout`] if the lock was not released in
    /// time, or [`StoreError::Open`] for any other open failure.
    pub async fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let deadline = Instant::now() + timeout;

        loop {
            let attempt = path.clone();
            match tokio::task::spawn_blocking(move || Database::create(attempt)).await? {
                Ok(db) => {
                    info!("Opened redirect store at {}", path.display());
                    return Ok(Self::new(db));
                }
                Err(DatabaseError::DatabaseAlreadyOpen) => {
                    if Instant::now() >= deadline {
                        return Err(StoreError::OpenTimeout { path, timeout });
                    }
                    debug!("Store {} is locked, retrying", path.display());
                    tokio::time::sleep(OPEN_RETRY_INTERVAL).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Wraps an already opened database.
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db)).await?
    }
}

fn get_url(db: &Database, path: &str) -> Result<Option<String>, StoreError> {
    let txn = db.begin_read()?;
    let table = match txn.open_table(REDIRECT_TABLE) {
        Ok(table) => table,
        Err(TableError::TableDoesNotExist(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let Some(value) = table.get(path)? else {
        return Ok(None);
    };

    String::from_utf8(value.value().to_vec())
        .map(Some)
        .map_err(|_| StoreError::InvalidValue {
            path: path.to_string(),
        })
}

fn put_all(txn: &WriteTransaction, pairs: &[PathUrlPair]) -> Result<(), StoreError> {
    let mut table = txn.open_table(REDIRECT_TABLE)?;
    for (index, pair) in pairs.iter().enumerate() {
        if let Some(reason) = pair.invalid_reason() {
            return Err(StoreError::InvalidPair { index, reason });
        }
        table.insert(pair.path.as_str(), pair.url.as_bytes())?;
    }
    Ok(())
}

fn upsert_all(db: &Database, pairs: &[PathUrlPair]) -> Result<usize, StoreError> {
    let txn = db.begin_write()?;
    match put_all(&txn, pairs) {
        Ok(()) => {
            txn.commit()?;
            Ok(pairs.len())
        }
        Err(e) => {
            if let Err(abort_err) = txn.abort() {
                warn!("Failed to abort redirect upsert: {}", abort_err);
            }
            Err(e)
        }
    }
}

fn list_all(db: &Database) -> Result<Vec<PathUrlPair>, StoreError> {
    let txn = db.begin_read()?;
    let table = match txn.open_table(REDIRECT_TABLE) {
        Ok(table) => table,
        Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut pairs = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        let path = key.value().to_string();
        let url = String::from_utf8(value.value().to_vec())
            .map_err(|_| StoreError::InvalidValue { path: path.clone() })?;
        pairs.push(PathUrlPair { path, url });
    }
    Ok(pairs)
}

#[async_trait]
impl PathResolver for RedbRedirectRepository {
    async fn resolve(&self, path: &str) -> Result<Option<String>, StoreError> {
        let path = path.to_owned();
        self.blocking(move |db| get_url(db, &path)).await
    }
}

#[async_trait]
impl RedirectRepository for RedbRedirectRepository {
    async fn upsert(&self, pairs: Vec<PathUrlPair>) -> Result<usize, StoreError> {
        if pairs.is_empty() {
            return Ok(0);
        }
        self.blocking(move |db| upsert_all(db, &pairs)).await
    }

    async fn entries(&self) -> Result<Vec<PathUrlPair>, StoreError> {
        self.blocking(list_all).await
    }

    async fn health_check(&self) -> bool {
        self.blocking(|db| {
            db.begin_read()?;
            Ok(())
        })
        .await
        .is_ok()
    }
}

/// Resolves the default store location relative to the working directory.
pub fn default_store_path() -> PathBuf {
    PathBuf::from("my.db")
}
