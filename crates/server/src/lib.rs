//! HTTP surface for the bookmart store.
//!
//! Routes are a thin dispatch layer: each handler forwards to exactly
//! one `StoreService` operation and maps the outcome onto a status
//! code. Read-only routes never mutate durable state.

pub mod errors;
pub mod routes;
pub mod startup;
