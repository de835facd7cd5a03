//! Contact-us submissions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use site_core::ContactId;

/// A contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A validated submission ready to insert.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}
