//! Seeds the durable store from a pair file.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use crate::infrastructure::parser::{self, Format, PairFile};

/// Upserts configuration-derived pairs into the durable store.
///
/// Runs at startup and on explicit reload, never on the request path.
pub struct Seeder<R: RedirectRepository> {
    repository: Arc<R>,
    source: Option<PairFile>,
}

impl<R: RedirectRepository> Seeder<R> {
    /// Creates a seeder reading from `source`, if one is configured.
    pub fn new(repository: Arc<R>, source: Option<PairFile>) -> Self {
        Self { repository, source }
    }

    /// Reads the configured pair file and upserts every pair.
    ///
    /// Returns the number of pairs written. A missing source, missing file,
    /// or empty file is a no-op: the store may already hold pairs from an
    /// earlier run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the file exists but cannot be read,
    /// [`AppError::Parse`] on malformed content, and [`AppError::Store`] if
    /// the write transaction fails.
    pub async fn seed(&self) -> Result<usize, AppError> {
        let Some(source) = &self.source else {
            debug!("No seed file configured");
            return Ok(0);
        };

        let bytes = match tokio::fs::read(&source.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Seed file {} not found, skipping", source.path.display());
                return Ok(0);
            }
            Err(source_err) => {
                return Err(AppError::Io {
                    path: source.path.clone(),
                    source: source_err,
                });
            }
        };

        let written = self.seed_bytes(&bytes, source.format).await?;
        info!(
            "Seeded {} pairs from {} ({})",
            written,
            source.path.display(),
            source.format
        );
        Ok(written)
    }

    /// Parses in-memory YAML/JSON and upserts the pairs.
    ///
    /// Whitespace-only input is a no-op.
    pub async fn seed_bytes(&self, bytes: &[u8], format: Format) -> Result<usize, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(0);
        }

        let pairs = parser::parse(bytes, format)?;
        Ok(self.repository.upsert(pairs).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PathUrlPair;
    use crate::domain::resolver::PathResolver;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use mockall::mock;
    use std::io::Write;

    mock! {
        Repo {}

        #[async_trait]
        impl PathResolver for Repo {
            async fn resolve(&self, path: &str) -> Result<Option<String>, StoreError>;
        }

        #[async_trait]
        impl RedirectRepository for Repo {
            async fn upsert(&self, pairs: Vec<PathUrlPair>) -> Result<usize, StoreError>;
            async fn entries(&self) -> Result<Vec<PathUrlPair>, StoreError>;
            async fn health_check(&self) -> bool;
        }
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_seed_without_source_is_noop() {
        let mut repo = MockRepo::new();
        repo.expect_upsert().never();

        let seeder = Seeder::new(Arc::new(repo), None);

        assert_eq!(seeder.seed().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_missing_file_is_noop() {
        let mut repo = MockRepo::new();
        repo.expect_upsert().never();

        let source = PairFile::new("/nonexistent/seed.yaml", Format::Yaml);
        let seeder = Seeder::new(Arc::new(repo), Some(source));

        assert_eq!(seeder.seed().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_empty_file_is_noop() {
        let mut repo = MockRepo::new();
        repo.expect_upsert().never();

        let file = write_temp(".json", "\n  \n");
        let source = PairFile::new(file.path(), Format::Json);
        let seeder = Seeder::new(Arc::new(repo), Some(source));

        assert_eq!(seeder.seed().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_upserts_pairs_in_order() {
        let mut repo = MockRepo::new();
        repo.expect_upsert()
            .times(1)
            .withf(|pairs| {
                pairs
                    == &vec![
                        PathUrlPair::new("/a", "https://a.test"),
                        PathUrlPair::new("/b", "https://b.test"),
                    ]
            })
            .returning(|pairs| Ok(pairs.len()));

        let file = write_temp(
            ".yaml",
            "- path: /a\n  url: https://a.test\n- path: /b\n  url: https://b.test\n",
        );
        let source = PairFile::new(file.path(), Format::Yaml);
        let seeder = Seeder::new(Arc::new(repo), Some(source));

        assert_eq!(seeder.seed().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_malformed_file_fails_without_upsert() {
        let mut repo = MockRepo::new();
        repo.expect_upsert().never();

        let file = write_temp(".json", r#"{"PathUrl": [{"path": 123}]}"#);
        let source = PairFile::new(file.path(), Format::Json);
        let seeder = Seeder::new(Arc::new(repo), Some(source));

        assert!(matches!(seeder.seed().await, Err(AppError::Parse(_))));
    }

    #[tokio::test]
    async fn test_seed_bytes_propagates_store_error() {
        let mut repo = MockRepo::new();
        repo.expect_upsert().times(1).returning(|_| {
            Err(StoreError::InvalidPair {
                index: 0,
                reason: "path is empty",
            })
        });

        let seeder = Seeder::new(Arc::new(repo), None);
        let result = seeder
            .seed_bytes(br#"{"PathUrl": [{"path": "", "url": "x"}]}"#, Format::Json)
            .await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }
}
