//! Shared utilities for the bookmart workspace.

pub mod env;
pub mod logging;
pub mod types;
