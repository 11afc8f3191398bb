//! Durable store backed by a relational database through SeaORM.
//!
//! Referential integrity lives in the schema (`todos.user_id` references
//! `users.id` with `ON DELETE SET NULL`, `users.email` is unique). Every
//! mutation runs in one transaction so the check-then-write sequences here
//! and the engine's constraint checks commit or roll back together.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, EntityTrait, IsolationLevel, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::Store;
use crate::domain::{
    NewTodo, NewUser, Todo, TodoChanges, TodoWithUser, User, UserChanges, UserWithTodos,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::entities::{todo, user, TodoActiveModel, TodoEntity, UserActiveModel, UserEntity};
use crate::infra::Database;

/// SeaORM implementation of [`Store`].
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a store over an already migrated database.
    pub fn from_database(database: &Database) -> Self {
        Self::new(database.get_connection())
    }

    /// Begin a read-write transaction.
    ///
    /// SQLite has no per-transaction isolation settings, so none are requested there.
    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await?
            }
        };
        Ok(txn)
    }

    /// Commit on success, roll back on error.
    async fn finish<T>(txn: DatabaseTransaction, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

async fn find_user<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<user::Model>> {
    Ok(UserEntity::find_by_id(id).one(conn).await?)
}

async fn owner_of<C: ConnectionTrait>(conn: &C, todo: &todo::Model) -> AppResult<Option<User>> {
    match todo.user_id {
        Some(user_id) => Ok(find_user(conn, user_id).await?.map(User::from)),
        None => Ok(None),
    }
}

async fn with_todos<C: ConnectionTrait>(conn: &C, model: user::Model) -> AppResult<UserWithTodos> {
    let todos = model.find_related(TodoEntity).all(conn).await?;
    Ok(UserWithTodos::loaded(
        User::from(model),
        todos.into_iter().map(Todo::from).collect(),
    ))
}

async fn email_taken<C: ConnectionTrait>(conn: &C, email: &str, owner: Option<Uuid>) -> AppResult<bool> {
    let mut query = UserEntity::find().filter(user::Column::Email.eq(email));
    if let Some(id) = owner {
        query = query.filter(user::Column::Id.ne(id));
    }
    Ok(query.one(conn).await?.is_some())
}

async fn insert_todo(txn: &DatabaseTransaction, input: NewTodo) -> AppResult<TodoWithUser> {
    let owner = match input.user_id {
        Some(user_id) => Some(
            find_user(txn, user_id)
                .await?
                .ok_or(AppError::UserNotFound(user_id))?,
        ),
        None => None,
    };

    let todo = Todo::new(input);
    let user_id = todo.user_id;
    let active = TodoActiveModel {
        id: Set(todo.id),
        title: Set(todo.title),
        completed: Set(todo.completed),
        user_id: Set(todo.user_id),
    };

    let model = active
        .insert(txn)
        .await
        .map_err(|e| AppError::from_todo_write(e, user_id))?;
    tracing::debug!(todo_id = %model.id, user_id = ?model.user_id, "todo created");

    Ok(TodoWithUser::new(model.into(), owner.map(User::from)))
}

async fn modify_todo(
    txn: &DatabaseTransaction,
    id: Uuid,
    changes: TodoChanges,
) -> AppResult<TodoWithUser> {
    let existing = TodoEntity::find_by_id(id).one(txn).await?.ok_or_not_found()?;

    if let Some(user_id) = changes.user_id {
        if find_user(txn, user_id).await?.is_none() {
            return Err(AppError::UserNotFound(user_id));
        }
    }

    let mut active: TodoActiveModel = existing.clone().into();
    if let Some(title) = changes.title {
        active.title = Set(title);
    }
    if let Some(completed) = changes.completed {
        active.completed = Set(completed);
    }
    if let Some(user_id) = changes.user_id {
        active.user_id = Set(Some(user_id));
    }

    let model = if active.is_changed() {
        active
            .update(txn)
            .await
            .map_err(|e| AppError::from_todo_write(e, changes.user_id))?
    } else {
        existing
    };
    tracing::debug!(todo_id = %id, "todo updated");

    let owner = owner_of(txn, &model).await?;
    Ok(TodoWithUser::new(model.into(), owner))
}

async fn insert_user(txn: &DatabaseTransaction, input: NewUser) -> AppResult<UserWithTodos> {
    if email_taken(txn, &input.email, None).await? {
        return Err(AppError::DuplicateEmail(input.email));
    }

    let user = User::new(input);
    let email = user.email.clone();
    let active = UserActiveModel {
        id: Set(user.id),
        email: Set(user.email),
        name: Set(user.name),
    };

    let model = active
        .insert(txn)
        .await
        .map_err(|e| AppError::from_user_write(e, &email))?;
    tracing::debug!(user_id = %model.id, "user created");

    Ok(UserWithTodos::loaded(model.into(), Vec::new()))
}

async fn modify_user(
    txn: &DatabaseTransaction,
    id: Uuid,
    changes: UserChanges,
) -> AppResult<UserWithTodos> {
    let existing = find_user(txn, id).await?.ok_or_not_found()?;

    if let Some(email) = &changes.email {
        if email_taken(txn, email, Some(id)).await? {
            return Err(AppError::DuplicateEmail(email.clone()));
        }
    }

    let mut active: UserActiveModel = existing.clone().into();
    if let Some(email) = changes.email.clone() {
        active.email = Set(email);
    }
    if let Some(name) = changes.name {
        active.name = Set(name);
    }

    let model = if active.is_changed() {
        let email = changes.email.unwrap_or_else(|| existing.email.clone());
        active
            .update(txn)
            .await
            .map_err(|e| AppError::from_user_write(e, &email))?
    } else {
        existing
    };
    tracing::debug!(user_id = %id, "user updated");

    with_todos(txn, model).await
}

async fn remove_user(txn: &DatabaseTransaction, id: Uuid) -> AppResult<bool> {
    // Orphan explicitly so engines without enforced foreign keys behave the same.
    let orphaned = TodoEntity::update_many()
        .col_expr(todo::Column::UserId, Expr::value(Option::<Uuid>::None))
        .filter(todo::Column::UserId.eq(id))
        .exec(txn)
        .await?;

    let deleted = UserEntity::delete_by_id(id).exec(txn).await?;
    if deleted.rows_affected == 0 {
        return Ok(false);
    }

    tracing::debug!(user_id = %id, orphaned = orphaned.rows_affected, "user deleted");
    Ok(true)
}

#[async_trait]
impl Store for DatabaseStore {
    async fn list_todos(&self) -> AppResult<Vec<TodoWithUser>> {
        let rows = TodoEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(todo, owner)| TodoWithUser::new(todo.into(), owner.map(User::from)))
            .collect())
    }

    async fn list_users(&self) -> AppResult<Vec<UserWithTodos>> {
        let rows = UserEntity::find()
            .find_with_related(TodoEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(user, todos)| {
                UserWithTodos::loaded(user.into(), todos.into_iter().map(Todo::from).collect())
            })
            .collect())
    }

    async fn get_todo(&self, id: Uuid) -> AppResult<TodoWithUser> {
        let (todo, owner) = TodoEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        Ok(TodoWithUser::new(todo.into(), owner.map(User::from)))
    }

    async fn get_user(&self, id: Uuid) -> AppResult<UserWithTodos> {
        let model = find_user(&self.db, id).await?.ok_or_not_found()?;
        with_todos(&self.db, model).await
    }

    async fn create_todo(&self, input: NewTodo) -> AppResult<TodoWithUser> {
        input.validate()?;
        let txn = self.begin().await?;
        let result = insert_todo(&txn, input).await;
        Self::finish(txn, result).await
    }

    async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> AppResult<TodoWithUser> {
        changes.validate()?;
        let txn = self.begin().await?;
        let result = modify_todo(&txn, id, changes).await;
        Self::finish(txn, result).await
    }

    async fn delete_todo(&self, id: Uuid) -> AppResult<bool> {
        let result = TodoEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::debug!(todo_id = %id, "todo deleted");
        }
        Ok(result.rows_affected > 0)
    }

    async fn create_user(&self, input: NewUser) -> AppResult<UserWithTodos> {
        input.validate()?;
        let txn = self.begin().await?;
        let result = insert_user(&txn, input).await;
        Self::finish(txn, result).await
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<UserWithTodos> {
        changes.validate()?;
        let txn = self.begin().await?;
        let result = modify_user(&txn, id, changes).await;
        Self::finish(txn, result).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<bool> {
        let txn = self.begin().await?;
        let result = remove_user(&txn, id).await;
        Self::finish(txn, result).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
