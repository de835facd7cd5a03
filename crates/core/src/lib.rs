//! Site Core - Shared types library.
//!
//! This crate provides common types used across the site backend components:
//! - `server` - HTTP/JSON API for contacts, pricing, projects and social links
//! - `cli` - Command-line tools for migrations, seeding and admin accounts
//!
//! # Architecture
//!
//! The core crate contains only types and pure lookup tables - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the social icon registry
//! - [`access`] - Which resource operations are public and which need an admin

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod types;

pub use access::{Access, Operation, Resource, policy};
pub use types::*;
