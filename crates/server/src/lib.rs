//! Site content backend library.
//!
//! Serves contacts, pricing plans, projects, and social links over
//! HTTP/JSON, with bearer-token admin authentication. Exposed as a library
//! so the CLI and integration tests can reuse the store and router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
