//! Todo domain entity and related types.

use uuid::Uuid;

use super::user::User;
use crate::config::MAX_TITLE_LENGTH;
use crate::errors::{AppError, AppResult};

/// Todo domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    /// Nullable reference to the owning user
    pub user_id: Option<Uuid>,
}

impl Todo {
    /// Create an incomplete todo with a freshly generated id.
    pub fn new(input: NewTodo) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            completed: false,
            user_id: input.user_id,
        }
    }

    /// Apply a partial update. Fields left as `None` are unchanged.
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = Some(user_id);
        }
    }

    /// Clear the owner reference after its user was deleted.
    pub fn orphan(&mut self) {
        self.user_id = None;
    }

    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Todo creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub user_id: Option<Uuid>,
}

impl NewTodo {
    pub fn validate(&self) -> AppResult<()> {
        validate_title(&self.title)
    }
}

/// Partial todo update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<Uuid>,
}

impl TodoChanges {
    pub fn validate(&self) -> AppResult<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.user_id.is_none()
    }
}

/// A todo together with its eagerly loaded owner, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoWithUser {
    pub todo: Todo,
    pub user: Option<User>,
}

impl TodoWithUser {
    pub fn new(todo: Todo, user: Option<User>) -> Self {
        Self { todo, user }
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.is_empty() {
        return Err(AppError::validation("Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}
