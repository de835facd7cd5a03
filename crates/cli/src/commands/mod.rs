//! CLI command implementations.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default: `sqlite://sqlite.db`)

pub mod admin;
pub mod migrate;
pub mod pricing;
pub mod seed;
pub mod status;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

use site_server::config::DEFAULT_DATABASE_URL;
use site_server::db::{self, RepositoryError};
use site_server::services::auth::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Query error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Connect to the database named by `DATABASE_URL`.
async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
