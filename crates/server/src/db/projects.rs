//! Project repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use site_core::ProjectId;

use super::RepositoryError;
use crate::models::{NewProject, Project, ProjectChanges};

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    title: String,
    description: String,
    image_url: Option<String>,
    link: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.id),
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            link: row.link,
            created_at: row.created_at,
        }
    }
}

/// Repository for portfolio projects.
pub struct ProjectRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r"
            SELECT id, title, description, image_url, link, created_at
            FROM projects
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Insert a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r"
            INSERT INTO projects (title, description, image_url, link, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, title, description, image_url, link, created_at
            ",
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.image_url.as_deref())
        .bind(project.link.as_deref())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace the submitted fields of a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
    ) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r"
            UPDATE projects
            SET title = COALESCE(?1, title),
                description = COALESCE(?2, description),
                image_url = CASE WHEN ?3 THEN ?4 ELSE image_url END,
                link = CASE WHEN ?5 THEN ?6 ELSE link END
            WHERE id = ?7
            RETURNING id, title, description, image_url, link, created_at
            ",
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.image_url.is_some())
        .bind(changes.image_url.clone().flatten())
        .bind(changes.link.is_some())
        .bind(changes.link.clone().flatten())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Project::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a project. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProjectId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count projects.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support;

    fn project(title: &str) -> NewProject {
        NewProject {
            title: title.to_owned(),
            description: "Something we built".to_owned(),
            image_url: Some("https://img.example.com/a.png".to_owned()),
            link: Some("https://example.com".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = test_support::pool().await;
        let repo = ProjectRepository::new(&pool);

        repo.create(&project("older")).await.unwrap();
        repo.create(&project("newer")).await.unwrap();

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[tokio::test]
    async fn test_update_can_clear_nullable_fields() {
        let pool = test_support::pool().await;
        let repo = ProjectRepository::new(&pool);
        let created = repo.create(&project("site")).await.unwrap();

        let changes = ProjectChanges {
            image_url: Some(None),
            ..Default::default()
        };
        let updated = repo.update(created.id, &changes).await.unwrap();

        assert_eq!(updated.image_url, None);
        assert_eq!(updated.link, created.link);
        assert_eq!(updated.title, "site");
    }

    #[tokio::test]
    async fn test_update_replaces_submitted_fields() {
        let pool = test_support::pool().await;
        let repo = ProjectRepository::new(&pool);
        let created = repo.create(&project("site")).await.unwrap();

        let changes = ProjectChanges {
            title: Some("renamed".to_owned()),
            link: Some(Some("https://new.example.com".to_owned())),
            ..Default::default()
        };
        let updated = repo.update(created.id, &changes).await.unwrap();

        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.link.as_deref(), Some("https://new.example.com"));
        assert_eq!(updated.image_url, created.image_url);
        assert_eq!(updated.created_at, created.created_at);
    }
}
