//! Volatile store backed by process-local maps.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::domain::{
    NewTodo, NewUser, Todo, TodoChanges, TodoWithUser, User, UserChanges, UserWithTodos,
};
use crate::errors::{AppError, AppResult, OptionExt};

/// Entity tables guarded together by one lock.
///
/// `*_order` keep insertion order for listings; `emails` indexes users by email
/// for the uniqueness check.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    user_order: Vec<Uuid>,
    emails: HashMap<String, Uuid>,
    todos: HashMap<Uuid, Todo>,
    todo_order: Vec<Uuid>,
}

impl Tables {
    fn todos_of(&self, user_id: Uuid) -> Vec<Todo> {
        self.todo_order
            .iter()
            .filter_map(|id| self.todos.get(id))
            .filter(|todo| todo.belongs_to(user_id))
            .cloned()
            .collect()
    }

    fn with_user(&self, todo: &Todo) -> TodoWithUser {
        let user = todo.user_id.and_then(|id| self.users.get(&id)).cloned();
        TodoWithUser::new(todo.clone(), user)
    }

    fn with_todos(&self, user: &User) -> UserWithTodos {
        UserWithTodos::loaded(user.clone(), self.todos_of(user.id))
    }

    fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(AppError::UserNotFound(user_id))
        }
    }

    fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.emails.get(email) {
            Some(id) if Some(*id) != owner => Err(AppError::DuplicateEmail(email.to_string())),
            _ => Ok(()),
        }
    }
}

/// In-memory implementation of [`Store`].
///
/// A single reader/writer lock covers every table: readers run concurrently,
/// each mutation holds the write lock for its whole check-then-write sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_todos(&self) -> AppResult<Vec<TodoWithUser>> {
        let tables = self.tables.read().await;
        Ok(tables
            .todo_order
            .iter()
            .filter_map(|id| tables.todos.get(id))
            .map(|todo| tables.with_user(todo))
            .collect())
    }

    async fn list_users(&self) -> AppResult<Vec<UserWithTodos>> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_order
            .iter()
            .filter_map(|id| tables.users.get(id))
            .map(|user| tables.with_todos(user))
            .collect())
    }

    async fn get_todo(&self, id: Uuid) -> AppResult<TodoWithUser> {
        let tables = self.tables.read().await;
        let todo = tables.todos.get(&id).ok_or_not_found()?;
        Ok(tables.with_user(todo))
    }

    async fn get_user(&self, id: Uuid) -> AppResult<UserWithTodos> {
        let tables = self.tables.read().await;
        let user = tables.users.get(&id).ok_or_not_found()?;
        Ok(tables.with_todos(user))
    }

    async fn create_todo(&self, input: NewTodo) -> AppResult<TodoWithUser> {
        input.validate()?;

        let mut tables = self.tables.write().await;
        if let Some(user_id) = input.user_id {
            tables.ensure_user(user_id)?;
        }

        let todo = Todo::new(input);
        tracing::debug!(todo_id = %todo.id, user_id = ?todo.user_id, "todo created");

        let created = tables.with_user(&todo);
        tables.todo_order.push(todo.id);
        tables.todos.insert(todo.id, todo);
        Ok(created)
    }

    async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> AppResult<TodoWithUser> {
        changes.validate()?;

        let mut tables = self.tables.write().await;
        if !tables.todos.contains_key(&id) {
            return Err(AppError::NotFound);
        }
        if let Some(user_id) = changes.user_id {
            tables.ensure_user(user_id)?;
        }

        let todo = tables.todos.get_mut(&id).ok_or_not_found()?;
        todo.apply(changes);
        let updated = todo.clone();
        tracing::debug!(todo_id = %id, "todo updated");

        Ok(tables.with_user(&updated))
    }

    async fn delete_todo(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.todos.remove(&id).is_none() {
            return Ok(false);
        }
        tables.todo_order.retain(|existing| *existing != id);
        tracing::debug!(todo_id = %id, "todo deleted");
        Ok(true)
    }

    async fn create_user(&self, input: NewUser) -> AppResult<UserWithTodos> {
        input.validate()?;

        let mut tables = self.tables.write().await;
        tables.ensure_email_free(&input.email, None)?;

        let user = User::new(input);
        tracing::debug!(user_id = %user.id, "user created");

        tables.emails.insert(user.email.clone(), user.id);
        tables.user_order.push(user.id);
        tables.users.insert(user.id, user.clone());
        Ok(UserWithTodos::loaded(user, Vec::new()))
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<UserWithTodos> {
        changes.validate()?;

        let mut tables = self.tables.write().await;
        let previous_email = tables.users.get(&id).ok_or_not_found()?.email.clone();
        if let Some(email) = &changes.email {
            tables.ensure_email_free(email, Some(id))?;
        }

        let user = tables.users.get_mut(&id).ok_or_not_found()?;
        user.apply(changes);
        let updated = user.clone();

        if updated.email != previous_email {
            tables.emails.remove(&previous_email);
            tables.emails.insert(updated.email.clone(), id);
        }
        tracing::debug!(user_id = %id, "user updated");

        Ok(tables.with_todos(&updated))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.remove(&id) else {
            return Ok(false);
        };
        tables.emails.remove(&user.email);
        tables.user_order.retain(|existing| *existing != id);

        let mut orphaned = 0usize;
        for todo in tables.todos.values_mut().filter(|todo| todo.belongs_to(id)) {
            todo.orphan();
            orphaned += 1;
        }
        tracing::debug!(user_id = %id, orphaned, "user deleted");

        Ok(true)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
