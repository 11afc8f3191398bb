//! Todo mappers.
//!
//! - downstream: store record -> [`TodoResponse`]
//! - upstream: API input -> store operation arguments

use uuid::Uuid;

use super::model::{CreateTodoInput, TodoResponse, UpdateTodoInput, UserSummary};
use super::parse_id;
use crate::domain::{NewTodo, TodoChanges, TodoWithUser};
use crate::errors::AppResult;

impl From<TodoWithUser> for TodoResponse {
    fn from(record: TodoWithUser) -> Self {
        let user = record.user.map(UserSummary::from);
        Self {
            id: record.todo.id.to_string(),
            title: record.todo.title,
            completed: record.todo.completed,
            user_id: user.as_ref().map(|u| u.id.clone()),
            user,
        }
    }
}

/// Owner reference from input. A malformed id is dropped rather than
/// rejected; whether a well-formed one exists is for the store to decide.
fn owner_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|raw| match Uuid::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!(user_id = raw, "ignoring malformed owner id");
            None
        }
    })
}

/// Build creation data.
pub fn upstream_create_todo(input: CreateTodoInput) -> NewTodo {
    NewTodo {
        title: input.title,
        user_id: owner_id(input.user_id.as_deref()),
    }
}

/// Build update arguments. The todo id must parse; the owner id is
/// treated exactly as on creation.
pub fn upstream_update_todo(id: &str, input: UpdateTodoInput) -> AppResult<(Uuid, TodoChanges)> {
    let id = parse_id(id, "todo")?;

    Ok((
        id,
        TodoChanges {
            title: input.title,
            completed: input.completed,
            user_id: owner_id(input.user_id.as_deref()),
        },
    ))
}
