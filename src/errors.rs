//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Shape errors (detected by the mapper)
    #[error("Invalid {0} identifier")]
    InvalidIdentifier(String),

    #[error("{0}")]
    Validation(String),

    // State errors (detected by the store)
    #[error("Resource not found")]
    NotFound,

    #[error("User with id {0} not found")]
    UserNotFound(Uuid),

    #[error("User with email {0} already exists")]
    DuplicateEmail(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentifier(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UserNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "The service is misconfigured".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn invalid_identifier(entity: impl Into<String>) -> Self {
        AppError::InvalidIdentifier(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Classify a failed user write, turning a unique-index violation on
    /// `users.email` into [`AppError::DuplicateEmail`].
    pub fn from_user_write(err: DbErr, email: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail(email.to_string()),
            _ => AppError::Database(err),
        }
    }

    /// Classify a failed todo write, turning a foreign-key violation on
    /// `todos.user_id` into [`AppError::UserNotFound`].
    pub fn from_todo_write(err: DbErr, user_id: Option<Uuid>) -> Self {
        match (err.sql_err(), user_id) {
            (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) => AppError::UserNotFound(id),
            _ => AppError::Database(err),
        }
    }
}
