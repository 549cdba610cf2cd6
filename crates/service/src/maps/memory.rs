use async_trait::async_trait;
use models::GameMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::RepositoryError;
use crate::maps::repository::MapRepository;
use crate::storage::ordered_map::OrderedMap;

/// Reference repository holding maps in process memory.
///
/// One mutex guards the whole table: reads and writes never overlap, and
/// listings come back in insertion order.
#[derive(Default)]
pub struct InMemoryMapRepository {
    maps: Mutex<OrderedMap<String, GameMap>>,
}

impl InMemoryMapRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl MapRepository for InMemoryMapRepository {
    async fn get_map(&self, id: &str) -> Result<GameMap, RepositoryError> {
        let maps = self.maps.lock().await;
        maps.get(id).cloned().ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn get_map_list(&self) -> Result<Vec<GameMap>, RepositoryError> {
        let maps = self.maps.lock().await;
        Ok(maps.values().cloned().collect())
    }

    async fn update_map(&self, id: &str, map: GameMap) -> Result<GameMap, RepositoryError> {
        let stored = map.with_id(id);
        let mut maps = self.maps.lock().await;
        let created = maps.upsert(id.to_string(), stored.clone()).is_none();
        debug!(map_id = %id, created, total = maps.len(), "map upserted in memory");
        Ok(stored)
    }
}
