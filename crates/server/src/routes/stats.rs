//! Dashboard counts.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::{ContactRepository, PricingRepository, ProjectRepository, SocialLinkRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Row counts per resource.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub contacts: i64,
    pub pricing: i64,
    pub projects: i64,
    pub social_links: i64,
}

/// Count every resource for the dashboard overview.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_claims): RequireAdmin,
) -> Result<Json<StatsResponse>> {
    let pool = state.pool();

    Ok(Json(StatsResponse {
        contacts: ContactRepository::new(pool).count().await?,
        pricing: PricingRepository::new(pool).count().await?,
        projects: ProjectRepository::new(pool).count().await?,
        social_links: SocialLinkRepository::new(pool).count().await?,
    }))
}
