//! Access policy for resource operations.
//!
//! Every resource router is guarded by the same table: a `(Resource,
//! Operation)` pair maps to [`Access::Public`] or [`Access::Admin`]. Keeping
//! the rules in one `const fn` means the whole policy can be read (and
//! tested) in one place.
//!
//! | Resource     | list   | create | update | delete | fetch metadata |
//! |--------------|--------|--------|--------|--------|----------------|
//! | contacts     | admin  | public | admin  | admin  | admin          |
//! | pricing      | public | admin  | admin  | admin  | admin          |
//! | projects     | public | admin  | admin  | admin  | admin          |
//! | social links | public | admin  | admin  | admin  | admin          |

use core::fmt;

use serde::Serialize;

/// An independently stored and routed content resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Contacts,
    Pricing,
    Projects,
    SocialLinks,
}

impl Resource {
    /// All resources.
    pub const ALL: [Self; 4] = [
        Self::Contacts,
        Self::Pricing,
        Self::Projects,
        Self::SocialLinks,
    ];

    /// Path segment the resource is mounted under (`/api/{segment}`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Pricing => "pricing",
            Self::Projects => "projects",
            Self::SocialLinks => "social-links",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// What a request does to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    /// Outbound preview lookup (projects only).
    FetchMetadata,
}

impl Operation {
    /// Classify a request by HTTP method and path.
    ///
    /// `path` is the request path as seen by the resource router. Returns
    /// `None` for methods no resource route answers (the router replies 405).
    #[must_use]
    pub fn classify(method: &str, path: &str) -> Option<Self> {
        match method {
            "GET" | "HEAD" if path.trim_end_matches('/').ends_with("/metadata") => {
                Some(Self::FetchMetadata)
            }
            "GET" | "HEAD" => Some(Self::List),
            "POST" => Some(Self::Create),
            "PUT" | "PATCH" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::FetchMetadata => "fetch_metadata",
        };
        f.write_str(s)
    }
}

/// Who may perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Access {
    /// Anyone, no token required.
    Public,
    /// Requires a valid admin bearer token.
    Admin,
}

/// Look up the access rule for an operation on a resource.
#[must_use]
pub const fn policy(resource: Resource, operation: Operation) -> Access {
    match (resource, operation) {
        // Contact-us form submissions come from anonymous visitors.
        (Resource::Contacts, Operation::Create)
        | (
            Resource::Pricing | Resource::Projects | Resource::SocialLinks,
            Operation::List,
        ) => Access::Public,
        _ => Access::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_are_write_public_read_private() {
        assert_eq!(
            policy(Resource::Contacts, Operation::Create),
            Access::Public
        );
        assert_eq!(policy(Resource::Contacts, Operation::List), Access::Admin);
        assert_eq!(
            policy(Resource::Contacts, Operation::Delete),
            Access::Admin
        );
    }

    #[test]
    fn test_content_resources_are_read_public_write_private() {
        for resource in [Resource::Pricing, Resource::Projects, Resource::SocialLinks] {
            assert_eq!(policy(resource, Operation::List), Access::Public);
            assert_eq!(policy(resource, Operation::Create), Access::Admin);
            assert_eq!(policy(resource, Operation::Update), Access::Admin);
            assert_eq!(policy(resource, Operation::Delete), Access::Admin);
        }
    }

    #[test]
    fn test_metadata_fetch_requires_admin() {
        for resource in Resource::ALL {
            assert_eq!(policy(resource, Operation::FetchMetadata), Access::Admin);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Operation::classify("GET", "/"), Some(Operation::List));
        assert_eq!(
            Operation::classify("GET", "/api/projects/metadata"),
            Some(Operation::FetchMetadata)
        );
        assert_eq!(Operation::classify("POST", "/"), Some(Operation::Create));
        assert_eq!(Operation::classify("PUT", "/3"), Some(Operation::Update));
        assert_eq!(
            Operation::classify("DELETE", "/3"),
            Some(Operation::Delete)
        );
        assert_eq!(Operation::classify("OPTIONS", "/"), None);
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(Resource::SocialLinks.to_string(), "social-links");
        assert_eq!(Resource::Pricing.path_segment(), "pricing");
    }
}
