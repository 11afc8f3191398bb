//! Domain layer - Core business entities and logic
//!
//! Users and todos as plain values, independent of how they are stored or
//! presented. Associations (`User::todos`, `Todo::user`) are never stored on
//! the entities; stores attach them to read results instead.

pub mod todo;
pub mod user;

pub use todo::{NewTodo, Todo, TodoChanges, TodoWithUser};
pub use user::{NewUser, User, UserChanges, UserWithTodos};
