//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error body has the shape `{"error": "<message>"}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::metadata::MetadataError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Link metadata lookup failed.
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::BAD_REQUEST,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::MissingCredentials
                | AuthError::NothingToUpdate
                | AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
                AuthError::AdminNotFound => StatusCode::NOT_FOUND,
                AuthError::Signing(_) | AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Metadata(err) => match err {
                MetadataError::MissingUrl | MetadataError::InvalidUrl(_) => {
                    StatusCode::BAD_REQUEST
                }
                MetadataError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown to the client. Internal details are never included.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => "Username and password required".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::MissingToken => "No token provided".to_string(),
                AuthError::InvalidToken(_) => "Invalid token".to_string(),
                AuthError::NothingToUpdate => "Username or new password required".to_string(),
                AuthError::AdminNotFound => "User not found".to_string(),
                AuthError::UsernameTaken => "Username already taken".to_string(),
                _ => "Internal server error".to_string(),
            },
            Self::Metadata(err) => match err {
                MetadataError::MissingUrl => "URL is required".to_string(),
                MetadataError::InvalidUrl(_) => "Invalid URL".to_string(),
                MetadataError::Http(_) => "Failed to fetch metadata".to_string(),
            },
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Database(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the authenticated admin.
///
/// Call this after successful authentication to associate errors with admins.
pub fn set_sentry_user(admin_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("project-123".to_string());
        assert_eq!(err.to_string(), "Not found: project-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::MissingToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::MissingToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::AdminNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Metadata(MetadataError::MissingUrl)),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_body_is_json_error_object() {
        let (status, body) = body_json(AppError::BadRequest(
            "Name, email, and message are required".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Name, email, and message are required" })
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let (status, body) = body_json(AppError::Database(RepositoryError::DataCorruption(
            "features column for plan 3 is not JSON".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_auth_messages() {
        let (_, body) = body_json(AppError::Auth(AuthError::InvalidCredentials)).await;
        assert_eq!(body["error"], "Invalid credentials");

        let (_, body) = body_json(AppError::Auth(AuthError::MissingToken)).await;
        assert_eq!(body["error"], "No token provided");
    }
}
