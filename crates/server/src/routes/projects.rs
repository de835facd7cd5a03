//! Portfolio project route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use site_core::ProjectId;

use super::DeleteResponse;
use super::extract::{ApiJson, ApiPath, ApiQuery, present};
use crate::db::{ProjectRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{NewProject, Project, ProjectChanges};
use crate::services::metadata;
use crate::state::AppState;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Project fields as submitted by the admin dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub link: Option<Option<String>>,
}

impl ProjectRequest {
    fn into_new(self) -> Result<NewProject> {
        match (present(self.title), present(self.description)) {
            (Some(title), Some(description)) => Ok(NewProject {
                title,
                description,
                image_url: present(self.image_url.flatten()),
                link: present(self.link.flatten()),
            }),
            _ => Err(AppError::BadRequest(
                "Title and description are required".to_string(),
            )),
        }
    }

    /// A blank `imageUrl`/`link` clears the column, like `null`.
    fn into_changes(self) -> ProjectChanges {
        ProjectChanges {
            title: present(self.title),
            description: present(self.description),
            image_url: self.image_url.map(present),
            link: self.link.map(present),
        }
    }
}

/// Response wrapping a single project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

/// Query for the metadata lookup.
#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    pub url: Option<String>,
}

/// Preview image found for a page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub image_url: Option<String>,
}

/// List projects, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    let projects = ProjectRepository::new(state.pool()).list().await?;
    Ok(Json(projects))
}

/// Create a project.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let new_project = body.into_new()?;
    let project = ProjectRepository::new(state.pool())
        .create(&new_project)
        .await?;

    tracing::info!(project_id = %project.id, title = %project.title, "Project created");
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// Replace the submitted fields of a project.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProjectId>,
    ApiJson(body): ApiJson<ProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let project = ProjectRepository::new(state.pool())
        .update(id, &body.into_changes())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Project not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// Delete a project.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProjectId>,
) -> Result<Json<DeleteResponse>> {
    let deleted = ProjectRepository::new(state.pool()).delete(id).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}

/// Look up the preview image of an external page.
#[instrument(skip(state))]
pub async fn fetch_metadata(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MetadataQuery>,
) -> Result<Json<MetadataResponse>> {
    let url = metadata::parse_target(query.url.as_deref())?;
    let image_url = state.metadata().fetch_image(&url).await?;
    Ok(Json(MetadataResponse { image_url }))
}
