//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Entity Rules
// =============================================================================

/// Maximum todo title length (matches the `todos.title` column)
pub const MAX_TITLE_LENGTH: usize = 255;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Frontend origins allowed by CORS when `CORS_ORIGINS` is unset
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
];

// =============================================================================
// Store Backends
// =============================================================================

/// Process-local store, lost on restart
pub const BACKEND_MEMORY: &str = "memory";

/// Relational database store
pub const BACKEND_DATABASE: &str = "database";

/// Database connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
