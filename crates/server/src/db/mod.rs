//! Database operations for the site store.
//!
//! # Database: `SQLite`
//!
//! ## Tables
//!
//! - `admins` - Admin credentials (username + Argon2 hash)
//! - `contacts` - Contact-us form submissions
//! - `pricing` - Pricing plans (features stored as a JSON array)
//! - `projects` - Portfolio projects
//! - `social_links` - Footer/social profile links
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and embedded into the
//! binary. They are NOT run on server startup; run them via:
//! ```bash
//! cargo run -p site-cli -- migrate
//! ```

pub mod admins;
pub mod contacts;
pub mod pricing;
pub mod projects;
pub mod seed;
pub mod social_links;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use admins::AdminRepository;
pub use contacts::ContactRepository;
pub use pricing::PricingRepository;
pub use projects::ProjectRepository;
pub use social_links::SocialLinkRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if it does not exist.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database.
///
/// Every connection to `:memory:` opens a fresh database, so the pool is
/// pinned to a single connection that is never recycled.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
        .await
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history does not
/// match the embedded migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Convert a unique-constraint violation into `RepositoryError::Conflict`.
pub(crate) fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    /// In-memory pool with the schema applied.
    #[allow(clippy::expect_used)]
    pub async fn pool() -> SqlitePool {
        let pool = super::create_memory_pool()
            .await
            .expect("in-memory pool should open");
        super::migrate(&pool)
            .await
            .expect("migrations should apply");
        pool
    }
}
