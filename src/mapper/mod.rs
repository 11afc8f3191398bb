//! Mapper layer - translation between store records and the API.
//!
//! Pure functions only. The mapper checks that input is well formed
//! (identifiers parse); whether it is valid against current state
//! (the referenced user exists, the email is free) is the store's call.

mod model;
mod todo_mapper;
mod user_mapper;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

pub use model::{
    CreateTodoInput, CreateUserInput, TodoResponse, UpdateTodoInput, UpdateUserInput,
    UserResponse, UserSummary,
};
pub use todo_mapper::{upstream_create_todo, upstream_update_todo};
pub use user_mapper::{upstream_create_user, upstream_update_user};

/// Parse an identifier that an operation requires.
pub fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_identifier(entity))
}
