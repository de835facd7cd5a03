//! Social link route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use site_core::SocialLinkId;

use super::DeleteResponse;
use super::extract::{ApiJson, ApiPath, present};
use crate::db::{RepositoryError, SocialLinkRepository};
use crate::error::{AppError, Result};
use crate::models::{NewSocialLink, SocialLink, SocialLinkChanges};
use crate::state::AppState;

/// Link fields as submitted by the admin dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct SocialLinkRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
}

impl SocialLinkRequest {
    fn into_new(self) -> Result<NewSocialLink> {
        match (present(self.name), present(self.icon), present(self.url)) {
            (Some(name), Some(icon), Some(url)) => Ok(NewSocialLink { name, icon, url }),
            _ => Err(AppError::BadRequest(
                "Name, icon, and url are required".to_string(),
            )),
        }
    }

    fn into_changes(self) -> SocialLinkChanges {
        SocialLinkChanges {
            name: present(self.name),
            icon: present(self.icon),
            url: present(self.url),
        }
    }
}

/// List links.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SocialLink>>> {
    let links = SocialLinkRepository::new(state.pool()).list().await?;
    Ok(Json(links))
}

/// Create a link.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SocialLinkRequest>,
) -> Result<(StatusCode, Json<SocialLink>)> {
    let new_link = body.into_new()?;
    let link = SocialLinkRepository::new(state.pool())
        .create(&new_link)
        .await?;

    if !link.icon_name().is_known() {
        tracing::warn!(
            link_id = %link.id,
            icon = %link.icon,
            fallback = %link.resolved_icon,
            "Social link uses an unknown icon"
        );
    }

    Ok((StatusCode::CREATED, Json(link)))
}

/// Replace the submitted fields of a link.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<SocialLinkId>,
    ApiJson(body): ApiJson<SocialLinkRequest>,
) -> Result<Json<SocialLink>> {
    let link = SocialLinkRepository::new(state.pool())
        .update(id, &body.into_changes())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Link not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(link))
}

/// Delete a link.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<SocialLinkId>,
) -> Result<Json<DeleteResponse>> {
    let deleted = SocialLinkRepository::new(state.pool()).delete(id).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}
