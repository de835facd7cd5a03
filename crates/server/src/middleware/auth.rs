//! Bearer token authentication.
//!
//! Provides the `RequireAdmin` extractor for handlers that need the calling
//! admin, and the token parsing shared with the access policy middleware.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::services::auth::{AuthError, Claims};
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Verify the bearer token on a request.
///
/// # Errors
///
/// Returns `AuthError::MissingToken` if there is no bearer token.
/// Returns `AuthError::InvalidToken` if the token does not verify.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = state.tokens().verify(token)?;

    set_sentry_user(&claims.user_id, &claims.username);
    Ok(claims)
}

/// Extractor that requires a valid admin bearer token.
///
/// Reuses the claims already verified by the access policy middleware when
/// present; otherwise verifies the header itself.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(claims): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", claims.username)
/// }
/// ```
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(Self(claims.clone()));
        }

        let claims = authenticate(state, &parts.headers)?;
        parts.extensions.insert(claims.clone());
        Ok(Self(claims))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_forms() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Basic YWRtaW46YWRtaW4=")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
    }
}
