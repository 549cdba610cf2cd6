use std::{borrow::Borrow, hash::Hash, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::RepositoryError;
use crate::storage::collection::DocumentCollection;
use crate::storage::ordered_map::OrderedMap;

/// Generic JSON file-backed key-value store.
///
/// Entries are kept in insertion order and persisted as a JSON array of
/// `[key, value]` pairs. Every mutation is written to disk before the write
/// lock is released, so a reader never sees a value that is not yet on disk.
pub struct JsonMapStore<K, V> {
    inner: RwLock<OrderedMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + Serialize + DeserializeOwned + Clone,
    V: Serialize + DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty list if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, RepositoryError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(RepositoryError::store)?;
        }

        let map = match fs::read(&file_path).await {
            Ok(bytes) => {
                let entries: Vec<(K, V)> = serde_json::from_slice(&bytes).map_err(|e| {
                    RepositoryError::Store(format!("corrupt store file {}: {}", file_path.display(), e))
                })?;
                OrderedMap::from_entries(entries)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = OrderedMap::new();
                write_entries(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(RepositoryError::store(e)),
        };
        info!(path = %file_path.display(), entries = map.len(), "json map store opened");

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    /// List all values in insertion order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist. Returns `true` when the key was new.
    ///
    /// If the file cannot be written, the in-memory entry is put back the way it was.
    pub async fn insert(&self, key: K, value: V) -> Result<bool, RepositoryError> {
        let mut map = self.inner.write().await;
        let previous = map.upsert(key.clone(), value);
        if let Err(e) = write_entries(&self.file_path, &map).await {
            match previous {
                Some(old) => {
                    map.upsert(key, old);
                }
                None => {
                    map.remove_last();
                }
            }
            return Err(e);
        }
        Ok(previous.is_none())
    }
}

/// Write through a sibling temp file so a crash never leaves a half-written store.
async fn write_entries<K, V>(path: &Path, map: &OrderedMap<K, V>) -> Result<(), RepositoryError>
where
    K: Eq + Hash + Clone + Serialize,
    V: Serialize,
{
    let data = serde_json::to_vec(map.entries()).map_err(RepositoryError::store)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(RepositoryError::store)?;
    fs::rename(&tmp, path).await.map_err(RepositoryError::store)?;
    debug!(path = %path.display(), entries = map.len(), "json map store persisted");
    Ok(())
}

#[async_trait]
impl<V> DocumentCollection<V> for JsonMapStore<String, V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    async fn find_by_key(&self, key: &str) -> Result<Option<V>, RepositoryError> {
        Ok(self.get(key).await)
    }

    async fn find_all(&self) -> Result<Vec<V>, RepositoryError> {
        Ok(self.values().await)
    }

    async fn upsert_by_key(&self, key: &str, doc: V) -> Result<V, RepositoryError> {
        self.insert(key.to_string(), doc.clone()).await?;
        Ok(doc)
    }
}
