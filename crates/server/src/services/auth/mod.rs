//! Authentication service.
//!
//! Username/password login against Argon2 hashes, plus stateless bearer
//! tokens (see [`token`]).

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenKeys};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use crate::db::{AdminRepository, RepositoryError};
use crate::models::{Admin, AdminIdentity};

/// Authentication service.
///
/// Handles admin login and credential changes.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
    tokens: &'a TokenKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, tokens: &'a TokenKeys) -> Self {
        Self {
            admins: AdminRepository::new(pool),
            tokens,
        }
    }

    /// Login with username and password, returning the admin and a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<(Admin, String), AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let (admin, password_hash) = self
            .admins
            .get_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(&AdminIdentity::from(&admin))?;
        Ok((admin, token))
    }

    /// Verify a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token does not verify.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    /// Change the username and/or password of the authenticated admin.
    ///
    /// Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NothingToUpdate` if both values are absent.
    /// Returns `AuthError::AdminNotFound` if the admin no longer exists.
    /// Returns `AuthError::UsernameTaken` if another admin has the username.
    pub async fn update_credentials(
        &self,
        identity: &AdminIdentity,
        username: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<Admin, AuthError> {
        let username = username.map(str::trim).filter(|u| !u.is_empty());
        let new_password = new_password.filter(|p| !p.is_empty());

        if username.is_none() && new_password.is_none() {
            return Err(AuthError::NothingToUpdate);
        }

        let password_hash = new_password.map(hash_password).transpose()?;

        self.admins
            .update_credentials(identity.id, username, password_hash.as_deref())
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::AdminNotFound,
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
