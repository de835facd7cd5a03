//! Portfolio project domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use site_core::ProjectId;

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Remote image URL or an inline `data:` URL.
    pub image_url: Option<String>,
    /// External link to the live project.
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated project ready to insert.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub link: Option<String>,
}

/// Fields to replace on an existing project.
///
/// The nullable columns use a nested `Option`: `None` leaves the column
/// unchanged, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<Option<String>>,
    pub link: Option<Option<String>>,
}
