//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing from a login request.
    #[error("username and password required")]
    MissingCredentials,

    /// Invalid credentials (wrong password or unknown username).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a request that needs one.
    #[error("no token provided")]
    MissingToken,

    /// Token is malformed, expired, or has a bad signature.
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Credential update with neither a username nor a new password.
    #[error("username or new password required")]
    NothingToUpdate,

    /// The token's admin no longer exists.
    #[error("admin not found")]
    AdminNotFound,

    /// Another admin already uses the requested username.
    #[error("username already taken")]
    UsernameTaken,

    /// Token signing failed.
    #[error("token signing error: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
