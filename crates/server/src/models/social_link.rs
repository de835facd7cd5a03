//! Social profile links.

use chrono::{DateTime, Utc};
use serde::Serialize;

use site_core::{IconName, KnownIcon, SocialLinkId};

/// A social profile link shown in the site footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: SocialLinkId,
    pub name: String,
    /// Icon key exactly as stored.
    pub icon: String,
    /// Registry icon to draw; [`KnownIcon::FALLBACK`] when `icon` is unknown.
    pub resolved_icon: KnownIcon,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SocialLink {
    /// The stored icon key resolved against the registry.
    #[must_use]
    pub fn icon_name(&self) -> IconName {
        IconName::parse(&self.icon)
    }
}

/// A validated link ready to insert.
#[derive(Debug, Clone)]
pub struct NewSocialLink {
    pub name: String,
    pub icon: String,
    pub url: String,
}

/// Fields to replace on an existing link; `None` leaves the column as-is.
#[derive(Debug, Clone, Default)]
pub struct SocialLinkChanges {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
}
