//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{todo_handler, user_handler};
use crate::mapper::{
    CreateTodoInput, CreateUserInput, TodoResponse, UpdateTodoInput, UpdateUserInput,
    UserResponse, UserSummary,
};

/// OpenAPI documentation for the Todo API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Users and the todos they own, over a volatile or durable store",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Todo endpoints
        todo_handler::list_todos,
        todo_handler::get_todo,
        todo_handler::create_todo,
        todo_handler::update_todo,
        todo_handler::delete_todo,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            TodoResponse,
            UserSummary,
            UserResponse,
            CreateTodoInput,
            UpdateTodoInput,
            CreateUserInput,
            UpdateUserInput,
        )
    ),
    tags(
        (name = "Todos", description = "Todo management operations"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
