//! Admin authentication route handlers.
//!
//! Tokens are stateless; logout only exists so the dashboard has something to
//! call before it drops its copy of the token.

use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::extract::ApiJson;
use crate::error::Result;
use crate::middleware::{RequireAdmin, authenticate};
use crate::services::auth::{AuthService, Claims};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Token check result.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: Claims,
}

/// Credential change request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsRequest {
    pub username: Option<String>,
    pub new_password: Option<String>,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Exchange a username and password for a bearer token.
#[instrument(skip(state, body), fields(username = body.username.as_deref().unwrap_or_default()))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let service = AuthService::new(state.pool(), state.tokens());
    let (admin, token) = service
        .login(
            body.username.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .await
        .inspect_err(|e| tracing::info!(error = %e, "Admin login failed"))?;

    tracing::info!(admin_id = %admin.id, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        username: admin.username,
    }))
}

/// Report whether the bearer token is valid.
#[instrument(skip(state, headers))]
pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<VerifyResponse>> {
    let claims = authenticate(&state, &headers)?;
    Ok(Json(VerifyResponse {
        valid: true,
        user: claims,
    }))
}

/// Stateless logout.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully",
    })
}

/// Change the calling admin's username and/or password.
#[instrument(skip(state, claims, body), fields(admin_id = %claims.user_id))]
pub async fn update_credentials(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    ApiJson(body): ApiJson<UpdateCredentialsRequest>,
) -> Result<Json<MessageResponse>> {
    let service = AuthService::new(state.pool(), state.tokens());
    let admin = service
        .update_credentials(
            &claims.identity(),
            body.username.as_deref(),
            body.new_password.as_deref(),
        )
        .await?;

    tracing::info!(
        admin_id = %admin.id,
        username_changed = admin.username != claims.username,
        "Admin credentials updated"
    );
    Ok(Json(MessageResponse {
        message: "Credentials updated successfully",
    }))
}
