//! Core types for the site backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod icon;
pub mod id;

pub use icon::{IconName, KnownIcon};
pub use id::*;
