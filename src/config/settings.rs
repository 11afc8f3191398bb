//! Application settings loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use super::constants::{
    BACKEND_DATABASE, BACKEND_MEMORY, DEFAULT_CORS_ORIGINS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};
use crate::errors::{AppError, AppResult};

/// Which store implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// In-process map store
    #[default]
    Memory,
    /// SeaORM-backed relational store
    Database,
}

impl FromStr for Backend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            BACKEND_MEMORY => Ok(Backend::Memory),
            BACKEND_DATABASE => Ok(Backend::Database),
            other => Err(AppError::config(format!("unknown store backend '{}'", other))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => write!(f, "{}", BACKEND_MEMORY),
            Backend::Database => write!(f, "{}", BACKEND_DATABASE),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    database_url: Option<String>,
    pub backend: Backend,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("backend", &self.backend)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            backend: Backend::default(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// Unparseable values fall back to their defaults with a warning; the
    /// connection string is only checked when the database backend starts.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let backend = match env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: AppError| {
                tracing::warn!("{}, falling back to {}", e, defaults.backend);
                defaults.backend
            }),
            Err(_) => defaults.backend,
        };

        let server_port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.server_port);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            backend,
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            cors_origins,
        }
    }

    /// Override the connection string (used by tests and the CLI).
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Connection string for the durable backend.
    ///
    /// Absence is a startup error for the database backend only.
    pub fn require_database_url(&self) -> AppResult<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| AppError::config("DATABASE_URL must be set for the database backend"))
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
