//! Storage abstractions for the service layer.
//!
//! The book catalog and the account ledger are two independent ordered
//! maps keyed by entity id. `EntityStore` is the minimal interface the
//! service needs; implementations decide durability:
//!
//! - `MemStore` — in-memory `BTreeMap`, for tests and ephemeral runs
//! - `JsonMapStore` — JSON file persistence, write-through on mutation

pub mod json_map_store;
pub mod mem_store;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use json_map_store::JsonMapStore;
pub use mem_store::MemStore;

/// Errors raised by storage backends. These sit outside the domain
/// taxonomy; the service surfaces them verbatim.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serde(String),
}

/// Minimal ordered-map interface over one entity collection.
///
/// `values()` enumerates in key order; callers must treat the order as
/// unspecified. Mutations are durable before the call returns, so the
/// state observed by the next call is always the committed state left
/// by the previous one.
#[async_trait]
pub trait EntityStore<V>: Send + Sync {
    /// Look up the value under `id`. Absence is `Ok(None)`, not an error.
    async fn get(&self, id: &Uuid) -> Result<Option<V>, StorageError>;

    /// Insert or replace the value under `id`.
    async fn insert(&self, id: Uuid, value: V) -> Result<(), StorageError>;

    /// Remove and return the value under `id`, if present.
    async fn remove(&self, id: &Uuid) -> Result<Option<V>, StorageError>;

    /// All stored values, enumerated in key order.
    async fn values(&self) -> Result<Vec<V>, StorageError>;
}
