//! User handlers.

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
use crate::mapper::{CreateUserInput, UpdateUserInput, UserResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// List all users with their todos
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.users().await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.user(&id).await?;
    Ok(Json(user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUserInput>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id")
    ),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed id or validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUserInput>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(&id, input).await?;
    Ok(Json(user))
}

/// Delete a user; its todos are kept with no owner
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Whether a user was removed", body = bool),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.user_service.delete_user(&id).await?;
    Ok(Json(deleted))
}
