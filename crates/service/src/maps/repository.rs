use async_trait::async_trait;
use models::GameMap;

use crate::errors::RepositoryError;

/// Storage contract for map documents, keyed by map id.
///
/// Implementations are chosen when the server is composed and shared as
/// `Arc<dyn MapRepository>`.
#[async_trait]
pub trait MapRepository: Send + Sync {
    /// Fails with [`RepositoryError::NotFound`] when no map has this id.
    async fn get_map(&self, id: &str) -> Result<GameMap, RepositoryError>;

    /// Every stored map. Empty when nothing is stored.
    async fn get_map_list(&self) -> Result<Vec<GameMap>, RepositoryError>;

    /// Insert or replace the map stored under `id` and return what was stored.
    /// The stored map's `id` is always `id`, whatever the payload carried.
    async fn update_map(&self, id: &str, map: GameMap) -> Result<GameMap, RepositoryError>;
}
