//! User domain entity and related types.

use uuid::Uuid;

use super::todo::Todo;
use crate::errors::{AppError, AppResult};

/// User domain entity
///
/// The set of todos referencing a user is never stored on the user itself;
/// stores compute it on demand (see [`UserWithTodos`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl User {
    /// Create a user with a freshly generated id.
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: input.email,
            name: input.name,
        }
    }

    /// Apply a partial update. Fields left as `None` are unchanged.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
    }
}

/// User creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

impl NewUser {
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_name(&self.name)
    }
}

/// Partial user update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserChanges {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }
}

/// A user together with its todo association.
///
/// `todos` is `None` when the association was not loaded for this read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithTodos {
    pub user: User,
    pub todos: Option<Vec<Todo>>,
}

impl UserWithTodos {
    pub fn loaded(user: User, todos: Vec<Todo>) -> Self {
        Self {
            user,
            todos: Some(todos),
        }
    }

    pub fn unloaded(user: User) -> Self {
        Self { user, todos: None }
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::validation("Email cannot be empty"));
    }
    Ok(())
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    Ok(())
}
