//! Path resolution capability shared by every lookup source.

use async_trait::async_trait;

use crate::error::StoreError;

/// Answers whether a request path has a configured redirect, and to where.
///
/// # Returns
///
/// - `Ok(Some(url))` when the path is configured
/// - `Ok(None)` when the path is definitely absent
///
/// # Errors
///
/// Returns [`StoreError`] when the answer could not be determined. Callers
/// must treat this as "try the next handler", never as "no such path".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PathResolver: Send + Sync {
    async fn resolve(&self, path: &str) -> Result<Option<String>, StoreError>;
}
