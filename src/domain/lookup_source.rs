//! Lookup sources consulted by the redirect handler chain.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::PathMap;
use crate::domain::repositories::RedirectRepository;
use crate::domain::resolver::PathResolver;
use crate::error::StoreError;

/// Resolves paths from an immutable in-memory [`PathMap`].
#[derive(Debug, Clone, Default)]
pub struct StaticMapSource {
    map: PathMap,
}

impl StaticMapSource {
    pub fn new(map: PathMap) -> Self {
        Self { map }
    }
}

#[async_trait]
impl PathResolver for StaticMapSource {
    async fn resolve(&self, path: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(path).map(str::to_owned))
    }
}

/// Where a link of the handler chain looks up its redirects.
///
/// Chosen from configuration when the chain is built.
#[derive(Clone)]
pub enum LookupSource {
    Static(StaticMapSource),
    Durable(Arc<dyn RedirectRepository>),
}

impl LookupSource {
    /// Wraps an in-memory map.
    pub fn from_map(map: PathMap) -> Self {
        Self::Static(StaticMapSource::new(map))
    }

    /// Wraps a durable store.
    pub fn durable<R>(repository: Arc<R>) -> Self
    where
        R: RedirectRepository + 'static,
    {
        Self::Durable(repository)
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Durable(_) => "durable",
        }
    }
}

#[async_trait]
impl PathResolver for LookupSource {
    async fn resolve(&self, path: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Static(source) => source.resolve(path).await,
            Self::Durable(repository) => repository.resolve(path).await,
        }
    }
}
