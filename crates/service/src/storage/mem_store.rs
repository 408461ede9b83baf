use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EntityStore, StorageError};

/// In-memory entity store backed by a `BTreeMap`.
///
/// `BTreeMap` keeps `values()` enumeration deterministic. Useful for
/// unit tests and ephemeral deployments where durability is not
/// required.
pub struct MemStore<V> {
    inner: Arc<RwLock<BTreeMap<Uuid, V>>>,
}

impl<V> MemStore<V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<V> Default for MemStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V: Clone + Send + Sync> EntityStore<V> for MemStore<V> {
    async fn get(&self, id: &Uuid) -> Result<Option<V>, StorageError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn insert(&self, id: Uuid, value: V) -> Result<(), StorageError> {
        self.inner.write().await.insert(id, value);
        Ok(())
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<V>, StorageError> {
        Ok(self.inner.write().await.remove(id))
    }

    async fn values(&self) -> Result<Vec<V>, StorageError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}
