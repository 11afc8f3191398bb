//! API-facing representations and mutation inputs.
//!
//! Identifiers cross the API boundary as opaque strings (UUID text form).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Todo as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    /// Todo identifier
    #[schema(example = "7f1c1f0e-3b7a-4a53-9a4e-0c1f7b6c2d10")]
    pub id: String,
    /// Todo title
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Completion flag
    pub completed: bool,
    /// Owner id, present only when the owner is attached
    pub user_id: Option<String>,
    /// Owner summary, present only when the owner is attached
    pub user: Option<UserSummary>,
}

/// User fields nested inside a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "Ada")]
    pub name: String,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// User identifier
    pub id: String,
    /// Unique email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Display name
    #[schema(example = "Ada")]
    pub name: String,
    /// Todos owned by this user (empty unless loaded)
    pub todos: Vec<TodoResponse>,
}

/// Create-todo input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoInput {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    #[schema(example = "Buy milk", max_length = 255)]
    pub title: String,
    /// Owner id; an unparseable value is ignored
    pub user_id: Option<String>,
}

/// Update-todo input (the id travels separately)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoInput {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    /// Completion flag (also accepted as `done`)
    #[serde(alias = "done")]
    pub completed: Option<bool>,
    /// New owner id; an unparseable value is ignored
    pub user_id: Option<String>,
}

/// Create-user input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserInput {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ada")]
    pub name: String,
}

/// Update-user input (the id travels separately)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
}
