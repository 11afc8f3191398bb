//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::config::Backend;

/// Todo API - users and their todos over a volatile or durable store
#[derive(Parser, Debug)]
#[command(name = "todo-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Arguments for the serve command.
///
/// Each flag overrides the matching value loaded from the environment.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Storage backend
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_are_optional() {
        let cli = Cli::try_parse_from(["todo-api", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert!(args.host.is_none());
                assert!(args.port.is_none());
                assert!(args.backend.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_backend_flag() {
        let cli =
            Cli::try_parse_from(["todo-api", "serve", "--backend", "database", "-p", "9000"])
                .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.backend, Some(Backend::Database));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_migrate_actions() {
        let cli = Cli::try_parse_from(["todo-api", "migrate", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
