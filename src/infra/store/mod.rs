//! Store layer - sole owner of entity state.
//!
//! [`Store`] is the capability both backends implement. All reads and
//! writes go through it, and both implementations enforce the same rules:
//!
//! - emails are unique across users;
//! - a todo's `user_id`, when set, points at a user that exists at write time;
//! - deleting a user orphans its todos in the same atomic step;
//! - every mutation is atomic with respect to concurrent callers.

mod database;
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewTodo, NewUser, TodoChanges, TodoWithUser, UserChanges, UserWithTodos};
use crate::errors::AppResult;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entity store shared by every request handler.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Snapshot of all todos, each with its owner attached.
    async fn list_todos(&self) -> AppResult<Vec<TodoWithUser>>;

    /// Snapshot of all users, each with its todos loaded.
    async fn list_users(&self) -> AppResult<Vec<UserWithTodos>>;

    /// Find a todo by id.
    async fn get_todo(&self, id: Uuid) -> AppResult<TodoWithUser>;

    /// Find a user by id, with its todos loaded.
    async fn get_user(&self, id: Uuid) -> AppResult<UserWithTodos>;

    /// Create a todo. Fails with `UserNotFound` if the referenced user is absent.
    async fn create_todo(&self, input: NewTodo) -> AppResult<TodoWithUser>;

    /// Apply the supplied fields to a todo.
    async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> AppResult<TodoWithUser>;

    /// Remove a todo. Returns `false` if it was already absent.
    async fn delete_todo(&self, id: Uuid) -> AppResult<bool>;

    /// Create a user. Fails with `DuplicateEmail` on an email collision.
    async fn create_user(&self, input: NewUser) -> AppResult<UserWithTodos>;

    /// Apply the supplied fields to a user.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<UserWithTodos>;

    /// Remove a user and orphan its todos. Returns `false` if it was already absent.
    async fn delete_user(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> AppResult<()>;
}
