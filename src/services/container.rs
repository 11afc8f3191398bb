//! Service Container - Centralized service access.
//!
//! Owns the store handle and hands out the services built on top of it.
//! The store is created once at startup and shared by reference; it is
//! never reachable as global state.

use std::sync::Arc;

use super::{TodoManager, TodoService, UserManager, UserService};
use crate::infra::{Database, DatabaseStore, MemoryStore, Store};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get todo service
    fn todos(&self) -> Arc<dyn TodoService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get the underlying store
    fn store(&self) -> Arc<dyn Store>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    store: Arc<dyn Store>,
    todo_service: Arc<dyn TodoService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a service container over any store
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            todo_service: Arc::new(TodoManager::new(store.clone())),
            user_service: Arc::new(UserManager::new(store.clone())),
            store,
        }
    }

    /// Services over a fresh volatile store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Services over a connected, migrated database
    pub fn from_database(database: &Database) -> Self {
        Self::new(Arc::new(DatabaseStore::from_database(database)))
    }
}

impl ServiceContainer for Services {
    fn todos(&self) -> Arc<dyn TodoService> {
        self.todo_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }
}
