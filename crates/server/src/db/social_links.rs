//! Social link repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use site_core::{IconName, SocialLinkId};

use super::RepositoryError;
use crate::models::{NewSocialLink, SocialLink, SocialLinkChanges};

#[derive(Debug, sqlx::FromRow)]
struct SocialLinkRow {
    id: i32,
    name: String,
    icon: String,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SocialLinkRow> for SocialLink {
    fn from(row: SocialLinkRow) -> Self {
        let resolved_icon = IconName::parse(&row.icon).resolved();
        Self {
            id: SocialLinkId::new(row.id),
            name: row.name,
            icon: row.icon,
            resolved_icon,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for social links.
pub struct SocialLinkRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SocialLinkRepository<'a> {
    /// Create a new social link repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all links in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<SocialLink>, RepositoryError> {
        let rows = sqlx::query_as::<_, SocialLinkRow>(
            r"
            SELECT id, name, icon, url, created_at, updated_at
            FROM social_links
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(SocialLink::from).collect())
    }

    /// Insert a link.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, link: &NewSocialLink) -> Result<SocialLink, RepositoryError> {
        let row = sqlx::query_as::<_, SocialLinkRow>(
            r"
            INSERT INTO social_links (name, icon, url, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, name, icon, url, created_at, updated_at
            ",
        )
        .bind(&link.name)
        .bind(&link.icon)
        .bind(&link.url)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace the submitted fields of a link and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no link has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: SocialLinkId,
        changes: &SocialLinkChanges,
    ) -> Result<SocialLink, RepositoryError> {
        let row = sqlx::query_as::<_, SocialLinkRow>(
            r"
            UPDATE social_links
            SET name = COALESCE(?1, name),
                icon = COALESCE(?2, icon),
                url = COALESCE(?3, url),
                updated_at = ?4
            WHERE id = ?5
            RETURNING id, name, icon, url, created_at, updated_at
            ",
        )
        .bind(changes.name.as_deref())
        .bind(changes.icon.as_deref())
        .bind(changes.url.as_deref())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(SocialLink::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a link. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: SocialLinkId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count links.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM social_links")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
