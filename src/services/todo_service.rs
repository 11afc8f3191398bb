//! Todo service - resolves the todo queries and mutations.
//!
//! Each operation maps the input upstream, calls the store, and maps the
//! result downstream. Errors pass through unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::AppResult;
use crate::infra::Store;
use crate::mapper::{
    parse_id, upstream_create_todo, upstream_update_todo, CreateTodoInput, TodoResponse,
    UpdateTodoInput,
};

/// Todo service trait for dependency injection.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// All todos with their owners
    async fn todos(&self) -> AppResult<Vec<TodoResponse>>;

    /// Single todo by id
    async fn todo(&self, id: &str) -> AppResult<TodoResponse>;

    async fn create_todo(&self, input: CreateTodoInput) -> AppResult<TodoResponse>;

    async fn update_todo(&self, id: &str, input: UpdateTodoInput) -> AppResult<TodoResponse>;

    /// `true` if the todo existed, `false` if it was already gone
    async fn delete_todo(&self, id: &str) -> AppResult<bool>;
}

/// Concrete implementation of TodoService over any [`Store`].
pub struct TodoManager {
    store: Arc<dyn Store>,
}

impl TodoManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TodoService for TodoManager {
    async fn todos(&self) -> AppResult<Vec<TodoResponse>> {
        let records = self.store.list_todos().await?;
        Ok(records.into_iter().map(TodoResponse::from).collect())
    }

    async fn todo(&self, id: &str) -> AppResult<TodoResponse> {
        let id = parse_id(id, "todo")?;
        Ok(self.store.get_todo(id).await?.into())
    }

    async fn create_todo(&self, input: CreateTodoInput) -> AppResult<TodoResponse> {
        let new_todo = upstream_create_todo(input);
        Ok(self.store.create_todo(new_todo).await?.into())
    }

    async fn update_todo(&self, id: &str, input: UpdateTodoInput) -> AppResult<TodoResponse> {
        let (id, changes) = upstream_update_todo(id, input)?;
        Ok(self.store.update_todo(id, changes).await?.into())
    }

    async fn delete_todo(&self, id: &str) -> AppResult<bool> {
        let id = parse_id(id, "todo")?;
        self.store.delete_todo(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::domain::{Todo, TodoWithUser};
    use crate::errors::AppError;
    use crate::infra::MockStore;

    fn service(store: MockStore) -> TodoManager {
        TodoManager::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_malformed_update_id_never_reaches_store() {
        let mut store = MockStore::new();
        store.expect_update_todo().never();

        let result = service(store)
            .update_todo("not-a-uuid", UpdateTodoInput::default())
            .await;

        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn test_malformed_owner_on_update_is_dropped() {
        let todo_id = Uuid::new_v4();
        let mut store = MockStore::new();
        store
            .expect_update_todo()
            .withf(move |id, changes| {
                *id == todo_id && changes.title.as_deref() == Some("X") && changes.user_id.is_none()
            })
            .times(1)
            .returning(|id, changes| {
                Ok(TodoWithUser::new(
                    Todo {
                        id,
                        title: changes.title.unwrap_or_default(),
                        completed: false,
                        user_id: None,
                    },
                    None,
                ))
            });

        let input = UpdateTodoInput {
            title: Some("X".to_string()),
            user_id: Some("not-a-uuid".to_string()),
            ..Default::default()
        };
        let updated = service(store)
            .update_todo(&todo_id.to_string(), input)
            .await
            .unwrap();

        assert_eq!(updated.title, "X");
    }

    #[tokio::test]
    async fn test_malformed_delete_id_is_rejected() {
        let mut store = MockStore::new();
        store.expect_delete_todo().never();

        let result = service(store).delete_todo("123").await;
        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn test_create_passes_parsed_owner_to_store() {
        let owner = Uuid::new_v4();
        let mut store = MockStore::new();
        store
            .expect_create_todo()
            .withf(move |input| input.user_id == Some(owner) && input.title == "T")
            .times(1)
            .returning(|input| {
                Ok(TodoWithUser::new(
                    Todo {
                        id: Uuid::new_v4(),
                        title: input.title,
                        completed: false,
                        user_id: input.user_id,
                    },
                    None,
                ))
            });

        let created = service(store)
            .create_todo(CreateTodoInput {
                title: "T".to_string(),
                user_id: Some(owner.to_string()),
            })
            .await
            .unwrap();

        assert_eq!(created.title, "T");
        assert!(!created.completed);
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let owner = Uuid::new_v4();
        let mut store = MockStore::new();
        store
            .expect_update_todo()
            .returning(move |_, _| Err(AppError::UserNotFound(owner)));

        let input = UpdateTodoInput {
            user_id: Some(owner.to_string()),
            ..Default::default()
        };
        let result = service(store)
            .update_todo(&Uuid::new_v4().to_string(), input)
            .await;

        assert!(matches!(result, Err(AppError::UserNotFound(id)) if id == owner));
    }
}
