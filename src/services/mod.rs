//! Application services layer - the query and mutation surface.
//!
//! Services compose the mapper and the store: parse and shape the input,
//! call the store, map the result for the API. They hold no state of
//! their own beyond the shared store handle.

pub mod container;
mod todo_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use todo_service::{TodoManager, TodoService};
pub use user_service::{UserManager, UserService};
