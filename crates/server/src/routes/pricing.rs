//! Pricing plan route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use site_core::PricingPlanId;

use super::DeleteResponse;
use super::extract::{ApiJson, ApiPath, present};
use crate::db::{PricingRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{NewPricingPlan, PricingPlan, PricingPlanChanges};
use crate::state::AppState;

/// Plan fields as submitted by the admin dashboard.
///
/// Used for both create and update; create additionally requires name,
/// price, description, and features.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub popular: Option<bool>,
    pub display_order: Option<i32>,
}

impl PricingPlanRequest {
    fn into_new(self) -> Result<NewPricingPlan> {
        match (
            present(self.name),
            present(self.price),
            present(self.description),
            self.features,
        ) {
            (Some(name), Some(price), Some(description), Some(features)) => Ok(NewPricingPlan {
                name,
                price,
                description,
                features,
                popular: self.popular.unwrap_or(false),
                display_order: self.display_order.unwrap_or(0),
            }),
            _ => Err(AppError::BadRequest("All fields are required".to_string())),
        }
    }

    fn into_changes(self) -> PricingPlanChanges {
        PricingPlanChanges {
            name: present(self.name),
            price: present(self.price),
            description: present(self.description),
            features: self.features,
            popular: self.popular,
            display_order: self.display_order,
        }
    }
}

/// Response wrapping a single plan.
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub success: bool,
    pub pricing: PricingPlan,
}

/// List plans in display order.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PricingPlan>>> {
    let plans = PricingRepository::new(state.pool()).list().await?;
    Ok(Json(plans))
}

/// Create a plan.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PricingPlanRequest>,
) -> Result<Json<PricingResponse>> {
    let plan = body.into_new()?;
    let pricing = PricingRepository::new(state.pool()).create(&plan).await?;

    tracing::info!(plan_id = %pricing.id, name = %pricing.name, "Pricing plan created");
    Ok(Json(PricingResponse {
        success: true,
        pricing,
    }))
}

/// Replace the submitted fields of a plan.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PricingPlanId>,
    ApiJson(body): ApiJson<PricingPlanRequest>,
) -> Result<Json<PricingResponse>> {
    let pricing = PricingRepository::new(state.pool())
        .update(id, &body.into_changes())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Pricing plan not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(PricingResponse {
        success: true,
        pricing,
    }))
}

/// Delete a plan.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PricingPlanId>,
) -> Result<Json<DeleteResponse>> {
    let deleted = PricingRepository::new(state.pool()).delete(id).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}
