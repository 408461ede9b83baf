//! Service layer providing business-oriented store operations on top of models.
//! - `StoreService` holds every business rule for the catalog, the
//!   ledger, and the cart/checkout workflow.
//! - Storage backends are injected behind `storage::EntityStore`.
//! - Identifier generation is injected behind `idgen::IdGenerator`.

pub mod errors;
pub mod idgen;
pub mod storage;
pub mod store;

pub use errors::StoreError;
pub use store::StoreService;
