//! Repository trait for the durable redirect store.

use async_trait::async_trait;

use crate::domain::entities::PathUrlPair;
use crate::domain::resolver::PathResolver;
use crate::error::StoreError;

/// Durable, transactional storage for path/url pairs.
///
/// Reads go through [`PathResolver::resolve`]; writes are batch upserts.
/// Entries are never deleted, so pairs seeded by an earlier run stay visible
/// until overwritten.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedbRedirectRepository`] - single-file redb store
#[async_trait]
pub trait RedirectRepository: PathResolver {
    /// Inserts or overwrites every pair in a single write transaction.
    ///
    /// Returns the number of pairs written.
    ///
    /// # Errors
    ///
    /// If any pair fails, the transaction is abandoned and none of the batch
    /// becomes visible.
    async fn upsert(&self, pairs: Vec<PathUrlPair>) -> Result<usize, StoreError>;

    /// Lists all stored pairs ordered by path.
    async fn entries(&self) -> Result<Vec<PathUrlPair>, StoreError>;

    /// Checks that a read transaction can be opened.
    async fn health_check(&self) -> bool;
}
