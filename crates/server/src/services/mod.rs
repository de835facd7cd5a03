//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin login, credential changes, bearer tokens
//! - `metadata` - Link preview image lookup for projects

pub mod auth;
pub mod metadata;
