//! User service - resolves the user queries and mutations.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::AppResult;
use crate::infra::Store;
use crate::mapper::{
    parse_id, upstream_create_user, upstream_update_user, CreateUserInput, UpdateUserInput,
    UserResponse,
};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// All users with their todos populated
    async fn users(&self) -> AppResult<Vec<UserResponse>>;

    /// Single user by id, with todos
    async fn user(&self, id: &str) -> AppResult<UserResponse>;

    async fn create_user(&self, input: CreateUserInput) -> AppResult<UserResponse>;

    async fn update_user(&self, id: &str, input: UpdateUserInput) -> AppResult<UserResponse>;

    /// `true` if the user existed; its todos are orphaned, not deleted
    async fn delete_user(&self, id: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserService over any [`Store`].
pub struct UserManager {
    store: Arc<dyn Store>,
}

impl UserManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn users(&self) -> AppResult<Vec<UserResponse>> {
        let records = self.store.list_users().await?;
        Ok(records.into_iter().map(UserResponse::from).collect())
    }

    async fn user(&self, id: &str) -> AppResult<UserResponse> {
        let id = parse_id(id, "user")?;
        Ok(self.store.get_user(id).await?.into())
    }

    async fn create_user(&self, input: CreateUserInput) -> AppResult<UserResponse> {
        let new_user = upstream_create_user(input);
        Ok(self.store.create_user(new_user).await?.into())
    }

    async fn update_user(&self, id: &str, input: UpdateUserInput) -> AppResult<UserResponse> {
        let (id, changes) = upstream_update_user(id, input)?;
        Ok(self.store.update_user(id, changes).await?.into())
    }

    async fn delete_user(&self, id: &str) -> AppResult<bool> {
        let id = parse_id(id, "user")?;
        self.store.delete_user(id).await
    }
}
