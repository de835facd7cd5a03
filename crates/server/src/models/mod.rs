//! Domain models for the site backend.
//!
//! These types represent validated domain objects separate from database row
//! types. Every model serializes with camelCase field names, which is the
//! shape the admin dashboard and the public site consume.

pub mod admin;
pub mod contact;
pub mod pricing;
pub mod project;
pub mod social_link;

pub use admin::{Admin, AdminIdentity};
pub use contact::{Contact, NewContact};
pub use pricing::{NewPricingPlan, PricingPlan, PricingPlanChanges};
pub use project::{NewProject, Project, ProjectChanges};
pub use social_link::{NewSocialLink, SocialLink, SocialLinkChanges};
