//! Infrastructure layer - External systems integration
//!
//! This module handles all persistence concerns:
//! - The `Store` capability and its two backends
//! - Database connections and migrations
//! - SeaORM entity definitions

pub mod db;
pub mod entities;
pub mod store;

pub use db::{Database, Migrator};
pub use store::{DatabaseStore, MemoryStore, Store};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockStore;
