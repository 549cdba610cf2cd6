use async_trait::async_trait;

use crate::errors::RepositoryError;

/// Keyed document collection, the capability a persistent map repository
/// needs from its backing store.
///
/// Failures of the store itself are reported as [`RepositoryError::Store`];
/// an absent key is `Ok(None)`, not an error.
#[async_trait]
pub trait DocumentCollection<D>: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<D>, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<D>, RepositoryError>;
    /// Insert or replace the document under `key`; returns the stored document.
    async fn upsert_by_key(&self, key: &str, doc: D) -> Result<D, RepositoryError>;
}
