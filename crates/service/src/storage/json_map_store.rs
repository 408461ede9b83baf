use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use uuid::Uuid;

use super::{EntityStore, StorageError};

/// JSON file-backed entity store.
///
/// Keeps a `BTreeMap<Uuid, V>` in memory and writes the whole map back
/// to its file on every mutation, so the file always reflects committed
/// state once a call returns. Intended for small collections where a
/// database is overkill.
pub struct JsonMapStore<V> {
    inner: Arc<RwLock<BTreeMap<Uuid, V>>>,
    file_path: PathBuf,
}

impl<V> JsonMapStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open the store at `path`. Creates the file with an empty map if
    /// it is missing; an unreadable file is treated as empty.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: BTreeMap<Uuid, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: BTreeMap<Uuid, V> = BTreeMap::new();
                let data = serde_json::to_vec(&empty)
                    .map_err(|e| StorageError::Serde(e.to_string()))?;
                fs::write(&file_path, data)
                    .await
                    .map_err(|e| StorageError::Io(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self {
            inner: Arc::new(RwLock::new(map)),
            file_path,
        }))
    }

    async fn save(&self) -> Result<(), StorageError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(|e| StorageError::Serde(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl<V> EntityStore<V> for JsonMapStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    async fn get(&self, id: &Uuid) -> Result<Option<V>, StorageError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn insert(&self, id: Uuid, value: V) -> Result<(), StorageError> {
        let mut map = self.inner.write().await;
        map.insert(id, value);
        drop(map);
        self.save().await
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<V>, StorageError> {
        let mut map = self.inner.write().await;
        let removed = map.remove(id);
        drop(map);
        self.save().await?;
        Ok(removed)
    }

    async fn values(&self) -> Result<Vec<V>, StorageError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_map_store_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn crud_persists_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = JsonMapStore::<String>::open(tmp.clone()).await?;

        assert!(store.values().await?.is_empty());

        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.insert(a, "1".to_string()).await?;
        store.insert(b, "2".to_string()).await?;
        assert_eq!(store.get(&a).await?.as_deref(), Some("1"));

        store.insert(a, "10".to_string()).await?;
        let removed = store.remove(&b).await?;
        assert_eq!(removed.as_deref(), Some("2"));

        // A reopened store must observe the committed state.
        let reloaded = JsonMapStore::<String>::open(tmp.clone()).await?;
        assert_eq!(reloaded.values().await?.len(), 1);
        assert_eq!(reloaded.get(&a).await?.as_deref(), Some("10"));
        assert_eq!(reloaded.get(&b).await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn open_creates_missing_file() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let _store = JsonMapStore::<String>::open(tmp.clone()).await?;
        assert!(tokio::fs::metadata(&tmp).await.is_ok());
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
