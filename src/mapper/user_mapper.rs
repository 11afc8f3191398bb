//! User mappers.
//!
//! - downstream: store record -> [`UserResponse`]
//! - upstream: API input -> store operation arguments

use uuid::Uuid;

use super::model::{CreateUserInput, TodoResponse, UpdateUserInput, UserResponse, UserSummary};
use super::parse_id;
use crate::domain::{NewUser, TodoWithUser, User, UserChanges, UserWithTodos};
use crate::errors::AppResult;

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
        }
    }
}

impl From<UserWithTodos> for UserResponse {
    fn from(record: UserWithTodos) -> Self {
        let UserWithTodos { user, todos } = record;

        // Owned todos carry their owner, which is the user being mapped.
        let todos = todos
            .unwrap_or_default()
            .into_iter()
            .map(|todo| TodoResponse::from(TodoWithUser::new(todo, Some(user.clone()))))
            .collect();

        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            todos,
        }
    }
}

pub fn upstream_create_user(input: CreateUserInput) -> NewUser {
    NewUser {
        email: input.email,
        name: input.name,
    }
}

pub fn upstream_update_user(id: &str, input: UpdateUserInput) -> AppResult<(Uuid, UserChanges)> {
    let id = parse_id(id, "user")?;
    Ok((
        id,
        UserChanges {
            email: input.email,
            name: input.name,
        },
    ))
}
