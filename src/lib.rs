//! Todo API - users and the todos they own.
//!
//! A small task-tracking backend with two interchangeable stores: a
//! volatile in-memory store and a durable SeaORM-backed store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core records and their validation rules
//! - **infra**: The `Store` capability, its backends, migrations
//! - **mapper**: Translation between API shapes and domain records
//! - **services**: Query and mutation surface over a store
//! - **api**: HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server on the in-memory store
//! cargo run -- serve
//!
//! # Start the server on a database
//! DATABASE_URL=sqlite://todos.db?mode=rwc cargo run -- serve --backend database
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod mapper;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::{Backend, Config};
pub use domain::{Todo, User};
pub use errors::{AppError, AppResult};
pub use infra::{DatabaseStore, MemoryStore, Store};
