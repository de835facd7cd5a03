//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span, echoed in the response)
//! 4. CORS (any origin)
//! 5. Body limit
//! 6. Access policy (per resource router)

pub mod access;
pub mod auth;
pub mod request_id;

pub use access::{AccessGuard, enforce_access};
pub use auth::{RequireAdmin, authenticate, bearer_token};
pub use request_id::{RequestId, request_id_middleware};
