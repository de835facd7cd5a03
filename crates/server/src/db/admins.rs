//! Admin repository for database operations.
//!
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds
//! without a live database.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use site_core::AdminId;

use super::{RepositoryError, map_unique_violation};
use crate::models::Admin;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: AdminId::new(row.id),
            username: row.username,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for credential lookups.
#[derive(Debug, sqlx::FromRow)]
struct AdminWithPasswordRow {
    id: i32,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin database operations.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an admin and their password hash by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminWithPasswordRow>(
            r"
            SELECT id, username, password, created_at
            FROM admins
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let admin = Admin {
                id: AdminId::new(r.id),
                username: r.username,
                created_at: r.created_at,
            };
            (admin, r.password)
        }))
    }

    /// Create an admin, or replace the password of an existing one with the
    /// same username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, username: &str, password_hash: &str) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admins (username, password, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (username) DO UPDATE SET password = excluded.password
            RETURNING id, username, created_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Change an admin's username and/or password hash.
    ///
    /// `None` leaves the corresponding column unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no admin has this ID.
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_credentials(
        &self,
        id: AdminId,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            UPDATE admins
            SET username = COALESCE(?1, username),
                password = COALESCE(?2, password)
            WHERE id = ?3
            RETURNING id, username, created_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username"))?;

        row.map(Admin::from).ok_or(RepositoryError::NotFound)
    }

    /// Count admin accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
