//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the admin id (`userId`) and username. They
//! are stateless: nothing is stored server-side, so a token stays valid until
//! `exp` even after logout.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use site_core::AdminId;

use super::AuthError;
use crate::models::AdminIdentity;

/// Claims embedded in an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Admin the token was issued to.
    pub user_id: AdminId,
    /// Username at issue time.
    pub username: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// The identity these claims vouch for.
    #[must_use]
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

/// Signing and verification keys plus the validity window.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    /// Build keys from the shared signing secret.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
            ttl,
        }
    }

    /// Issue a token for an admin, valid from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue(&self, admin: &AdminIdentity) -> Result<String, AuthError> {
        self.issue_at(admin, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue_at(
        &self,
        admin: &AdminIdentity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            user_id: admin.id,
            username: admin.username.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::Signing)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed, expired,
    /// or signed with a different key.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn keys(secret: &str) -> TokenKeys {
        TokenKeys::new(&SecretString::from(secret), Duration::hours(24))
    }

    fn admin() -> AdminIdentity {
        AdminIdentity {
            id: AdminId::new(1),
            username: "admin".to_owned(),
        }
    }

    #[test]
    fn test_issue_then_verify_yields_same_identity() {
        let keys = keys("k3y-for-tests-0123456789-abcdefghij");
        let token = keys.issue(&admin()).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.identity(), admin());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys("k3y-for-tests-0123456789-abcdefghij");
        let issued = Utc::now() - Duration::hours(25);
        let token = keys.issue_at(&admin(), issued).unwrap();

        assert!(matches!(
            keys.verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_key_is_rejected() {
        let token = keys("first-k3y-0123456789-abcdefghijkl")
            .issue(&admin())
            .unwrap();

        assert!(
            keys("other-k3y-0123456789-abcdefghijkl")
                .verify(&token)
                .is_err()
        );
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let keys = keys("k3y-for-tests-0123456789-abcdefghij");
        let token = keys.issue(&admin()).unwrap();
        let forged = keys
            .issue(&AdminIdentity {
                id: AdminId::new(2),
                username: "mallory".to_owned(),
            })
            .unwrap();

        // Splice the forged payload onto the original signature.
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;
        let tampered = parts.join(".");

        assert!(keys.verify(&tampered).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let keys = keys("k3y-for-tests-0123456789-abcdefghij");
        assert!(keys.verify("not.a.jwt").is_err());
        assert!(keys.verify("").is_err());
    }

    #[test]
    fn test_claims_use_camel_case() {
        let claims = Claims {
            user_id: AdminId::new(7),
            username: "admin".to_owned(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["username"], "admin");
    }
}
