//! Admin domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use site_core::AdminId;

/// An admin account (domain type).
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login name (unique).
    pub username: String,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}

/// The principal carried by a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    /// Admin the token was issued to.
    pub id: AdminId,
    /// Username at the time the token was issued.
    pub username: String,
}

impl From<&Admin> for AdminIdentity {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}
