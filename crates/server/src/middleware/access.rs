//! Access policy enforcement for resource routers.
//!
//! Each resource router is wrapped in [`enforce_access`] with its
//! [`Resource`]. The middleware classifies the request into an
//! [`Operation`], looks the pair up in [`site_core::policy`], and requires a
//! valid admin token for `Admin` operations. Verified claims and the
//! [`AdminIdentity`] are inserted into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use site_core::{Access, Operation, Resource, policy};

use super::auth::authenticate;
use crate::error::AppError;
use crate::state::AppState;

/// Middleware state: the app state plus the resource being guarded.
#[derive(Clone)]
pub struct AccessGuard {
    state: AppState,
    resource: Resource,
}

impl AccessGuard {
    /// Guard for one resource router.
    #[must_use]
    pub const fn new(state: AppState, resource: Resource) -> Self {
        Self { state, resource }
    }
}

/// Enforce the access policy for the guarded resource.
///
/// Requests whose method maps to no operation pass through untouched so the
/// router can answer them (typically 405).
///
/// # Errors
///
/// Returns 401 if an admin-only operation has no valid bearer token.
pub async fn enforce_access(
    State(guard): State<AccessGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(operation) = Operation::classify(request.method().as_str(), request.uri().path())
    else {
        return Ok(next.run(request).await);
    };

    if policy(guard.resource, operation) == Access::Admin {
        let claims = authenticate(&guard.state, request.headers()).inspect_err(|e| {
            tracing::debug!(
                resource = ?guard.resource,
                ?operation,
                error = %e,
                "Admin access denied"
            );
        })?;

        request.extensions_mut().insert(claims.identity());
        request.extensions_mut().insert(claims);
    }

    Ok(next.run(request).await)
}
