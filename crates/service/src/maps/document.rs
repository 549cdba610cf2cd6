use std::sync::Arc;

use async_trait::async_trait;
use models::{GameMap, MapMetadata, MapTile};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::RepositoryError;
use crate::maps::repository::MapRepository;
use crate::storage::collection::DocumentCollection;

/// Stored shape of a map: the map id is the collection key, metadata and
/// tiles are embedded as nested structures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(rename = "_id")]
    pub key: String,
    pub metadata: MapMetadata,
    pub tiles: Vec<Vec<MapTile>>,
}

impl From<GameMap> for MapDocument {
    fn from(map: GameMap) -> Self {
        Self { key: map.id, metadata: map.metadata, tiles: map.tiles }
    }
}

impl From<MapDocument> for GameMap {
    fn from(doc: MapDocument) -> Self {
        Self { id: doc.key, metadata: doc.metadata, tiles: doc.tiles }
    }
}

/// Map repository over any keyed document collection.
pub struct DocumentMapRepository<C> {
    collection: Arc<C>,
}

impl<C: DocumentCollection<MapDocument>> DocumentMapRepository<C> {
    pub fn new(collection: Arc<C>) -> Self { Self { collection } }
}

#[async_trait]
impl<C> MapRepository for DocumentMapRepository<C>
where
    C: DocumentCollection<MapDocument> + 'static,
{
    async fn get_map(&self, id: &str) -> Result<GameMap, RepositoryError> {
        self.collection
            .find_by_key(id)
            .await?
            .map(GameMap::from)
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn get_map_list(&self) -> Result<Vec<GameMap>, RepositoryError> {
        let docs = self.collection.find_all().await?;
        Ok(docs.into_iter().map(GameMap::from).collect())
    }

    #[instrument(skip(self, map), fields(map_id = %id))]
    async fn update_map(&self, id: &str, map: GameMap) -> Result<GameMap, RepositoryError> {
        let doc = MapDocument::from(map.with_id(id));
        let stored = self.collection.upsert_by_key(id, doc).await?;
        debug!(rows = stored.tiles.len(), "map document upserted");
        Ok(stored.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonMapStore;
    use models::fixtures::generate_test_map;

    struct BrokenCollection;

    #[async_trait]
    impl DocumentCollection<MapDocument> for BrokenCollection {
        async fn find_by_key(&self, _key: &str) -> Result<Option<MapDocument>, RepositoryError> {
            Err(RepositoryError::Store("connection refused".into()))
        }
        async fn find_all(&self) -> Result<Vec<MapDocument>, RepositoryError> {
            Err(RepositoryError::Store("connection refused".into()))
        }
        async fn upsert_by_key(&self, _key: &str, _doc: MapDocument) -> Result<MapDocument, RepositoryError> {
            Err(RepositoryError::Store("connection refused".into()))
        }
    }

    async fn file_repo(tag: &str) -> anyhow::Result<(DocumentMapRepository<JsonMapStore<String, MapDocument>>, std::path::PathBuf)> {
        let path = std::env::temp_dir().join(format!("map_documents_{}_{}.json", tag, uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, MapDocument>::new(&path).await?;
        Ok((DocumentMapRepository::new(store), path))
    }

    #[test]
    fn document_uses_underscore_id_key() {
        let doc = MapDocument::from(generate_test_map(1, "a").with_id("k1"));
        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v["_id"], "k1");
        assert!(v.get("id").is_none());
        assert_eq!(v["tiles"][0][0]["tileName"], "test-tile");
    }

    #[tokio::test]
    async fn upsert_forces_path_id_and_round_trips() -> anyhow::Result<()> {
        let (repo, path) = file_repo("roundtrip").await?;
        let map = generate_test_map(3, "שָׁלוֹשׁ");

        let stored = repo.update_map("forced", map.clone()).await?;
        assert_eq!(stored, map.clone().with_id("forced"));
        assert_eq!(repo.get_map("forced").await?, stored);
        assert!(repo.get_map(&map.id).await.unwrap_err().is_not_found());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn second_upsert_replaces_content() -> anyhow::Result<()> {
        let (repo, path) = file_repo("replace").await?;
        let mut map = generate_test_map(2, "Mephistopholes");
        repo.update_map("m", map.clone()).await?;
        map.metadata.author = "Hingle McCringleBerry".into();
        repo.update_map("m", map).await?;

        let list = repo.get_map_list().await?;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "m");
        assert_eq!(list[0].metadata.author, "Hingle McCringleBerry");

        // survives reopening the file
        let reopened = DocumentMapRepository::new(JsonMapStore::<String, MapDocument>::new(&path).await?);
        assert_eq!(reopened.get_map("m").await?.metadata.author, "Hingle McCringleBerry");

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let repo = DocumentMapRepository::new(Arc::new(BrokenCollection));
        assert!(matches!(repo.get_map("x").await, Err(RepositoryError::Store(_))));
        assert!(matches!(repo.get_map_list().await, Err(RepositoryError::Store(_))));
        let res = repo.update_map("x", generate_test_map(1, "a")).await;
        assert!(matches!(res, Err(RepositoryError::Store(_))));
    }
}
