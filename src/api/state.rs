//! Application state - Dependency injection container.
//!
//! Provides handlers with the services and the store they share.

use std::sync::Arc;

use crate::infra::Store;
use crate::services::{ServiceContainer, Services, TodoService, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Todo service
    pub todo_service: Arc<dyn TodoService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Backing store, used directly only for health checks
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Create application state over a store.
    ///
    /// This is the usual entry point: one store, shared by every service.
    pub fn from_store(store: Arc<dyn Store>) -> Self {
        Self::from_container(&Services::new(store))
    }

    /// Create application state from a service container.
    pub fn from_container(container: &impl ServiceContainer) -> Self {
        Self {
            todo_service: container.todos(),
            user_service: container.users(),
            store: container.store(),
        }
    }
}
