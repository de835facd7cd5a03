//! Pricing plan repository.
//!
//! Features are stored as a JSON array in a TEXT column.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use site_core::PricingPlanId;

use super::RepositoryError;
use crate::models::{NewPricingPlan, PricingPlan, PricingPlanChanges};

const PLAN_COLUMNS: &str =
    "id, name, price, description, features, popular, display_order, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PricingPlanRow {
    id: i32,
    name: String,
    price: String,
    description: String,
    features: String,
    popular: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PricingPlanRow> for PricingPlan {
    type Error = RepositoryError;

    fn try_from(row: PricingPlanRow) -> Result<Self, Self::Error> {
        let features: Vec<String> = serde_json::from_str(&row.features).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid features for plan {}: {e}", row.id))
        })?;

        Ok(Self {
            id: PricingPlanId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            features,
            popular: row.popular,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn encode_features(features: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(features)
        .map_err(|e| RepositoryError::DataCorruption(format!("unencodable features: {e}")))
}

/// Repository for pricing plans.
pub struct PricingRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PricingRepository<'a> {
    /// Create a new pricing repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all plans in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored feature list is invalid.
    pub async fn list(&self) -> Result<Vec<PricingPlan>, RepositoryError> {
        let rows = sqlx::query_as::<_, PricingPlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM pricing ORDER BY display_order ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert a plan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, plan: &NewPricingPlan) -> Result<PricingPlan, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, PricingPlanRow>(&format!(
            r"
            INSERT INTO pricing
                (name, price, description, features, popular, display_order, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING {PLAN_COLUMNS}
            "
        ))
        .bind(&plan.name)
        .bind(&plan.price)
        .bind(&plan.description)
        .bind(encode_features(&plan.features)?)
        .bind(plan.popular)
        .bind(plan.display_order)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace the submitted fields of a plan and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no plan has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: PricingPlanId,
        changes: &PricingPlanChanges,
    ) -> Result<PricingPlan, RepositoryError> {
        let features = changes
            .features
            .as_deref()
            .map(encode_features)
            .transpose()?;

        let row = sqlx::query_as::<_, PricingPlanRow>(&format!(
            r"
            UPDATE pricing
            SET name = COALESCE(?1, name),
                price = COALESCE(?2, price),
                description = COALESCE(?3, description),
                features = COALESCE(?4, features),
                popular = COALESCE(?5, popular),
                display_order = COALESCE(?6, display_order),
                updated_at = ?7
            WHERE id = ?8
            RETURNING {PLAN_COLUMNS}
            "
        ))
        .bind(changes.name.as_deref())
        .bind(changes.price.as_deref())
        .bind(changes.description.as_deref())
        .bind(features)
        .bind(changes.popular)
        .bind(changes.display_order)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a plan. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: PricingPlanId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM pricing WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every plan. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM pricing")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count plans.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pricing")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
