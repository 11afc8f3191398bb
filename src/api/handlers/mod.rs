//! HTTP request handlers.

pub mod todo_handler;
pub mod user_handler;

pub use todo_handler::todo_routes;
pub use user_handler::user_routes;
