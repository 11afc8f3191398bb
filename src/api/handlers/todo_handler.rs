//! Todo handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::mapper::{CreateTodoInput, TodoResponse, UpdateTodoInput};

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).patch(update_todo).delete(delete_todo))
}

/// List all todos with their owners
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "All todos", body = Vec<TodoResponse>)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> AppResult<Json<Vec<TodoResponse>>> {
    let todos = state.todo_service.todos().await?;
    Ok(Json(todos))
}

/// Get a todo by id
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = String, Path, description = "Todo id")
    ),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state.todo_service.todo(&id).await?;
    Ok(Json(todo))
}

/// Create a todo, optionally owned by a user
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body = CreateTodoInput,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Owner does not exist")
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTodoInput>,
) -> AppResult<(StatusCode, Json<TodoResponse>)> {
    let todo = state.todo_service.create_todo(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Partially update a todo
#[utoipa::path(
    patch,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = String, Path, description = "Todo id")
    ),
    request_body = UpdateTodoInput,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Malformed id or validation error"),
        (status = 404, description = "Todo not found"),
        (status = 422, description = "Owner does not exist")
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTodoInput>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state.todo_service.update_todo(&id, input).await?;
    Ok(Json(todo))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = String, Path, description = "Todo id")
    ),
    responses(
        (status = 200, description = "Whether a todo was removed", body = bool),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.todo_service.delete_todo(&id).await?;
    Ok(Json(deleted))
}
