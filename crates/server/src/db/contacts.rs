//! Contact submission repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use site_core::ContactId;

use super::RepositoryError;
use crate::models::{Contact, NewContact};

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i32,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId::new(row.id),
            name: row.name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Repository for contact submissions.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all submissions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, name, email, message, created_at
            FROM contacts
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    /// Store a new submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, contact: &NewContact) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO contacts (name, email, message, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, message, created_at
            ",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a submission.
    ///
    /// Returns whether a row was removed; deleting an unknown ID is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ContactId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count submissions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
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

    fn submission(name: &str) -> NewContact {
        NewContact {
            name: name.to_owned(),
            email: format!("{name}@example.com"),
            message: "hello".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let pool = test_support::pool().await;
        let repo = ContactRepository::new(&pool);

        repo.create(&submission("first")).await.unwrap();
        repo.create(&submission("second")).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let pool = test_support::pool().await;
        let repo = ContactRepository::new(&pool);
        let contact = repo.create(&submission("a")).await.unwrap();

        assert!(repo.delete(contact.id).await.unwrap());
        assert!(!repo.delete(contact.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
