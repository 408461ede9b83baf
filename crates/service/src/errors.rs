use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Error taxonomy for store operations.
///
/// The first three variants are the closed set of domain errors every
/// caller must match on. `Storage` carries failures from the
/// persistence substrate and is surfaced verbatim, never retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account does not exist: {0}")]
    AccountDoesNotExist(Uuid),
    #[error("book does not exist: {0}")]
    BookDoesNotExist(Uuid),
    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
