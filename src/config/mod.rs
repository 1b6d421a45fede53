//! Configuration management for database and application settings.

/// Database connection management and schema bootstrap
pub mod database;

use crate::errors::Result;

/// Runtime settings resolved from the environment (with `.env` support via
/// `dotenvy`, loaded in `main` before this is read).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SeaORM connection string; defaults to a local `SQLite` file
    pub database_url: String,
    /// Socket address the HTTP server binds to
    pub bind_addr: String,
}

impl AppConfig {
    /// Builds the configuration from `DATABASE_URL` and `BIND_ADDR`, falling
    /// back to local-development defaults when either is unset.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/farmsync.sqlite?mode=rwc".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        })
    }
}
