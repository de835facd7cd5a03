//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database)
//!
//! # Admin auth
//! POST /api/admin/auth/login          - Exchange credentials for a token
//! GET  /api/admin/auth/verify         - Check a bearer token
//! POST /api/admin/auth/logout         - Stateless logout
//! PUT  /api/admin/auth/credentials    - Change username/password (admin)
//! GET  /api/admin/stats               - Row counts (admin)
//!
//! # Resources (access per `site_core::policy`)
//! GET|POST       /api/contacts
//! DELETE         /api/contacts/{id}
//! GET|POST       /api/pricing
//! PUT|DELETE     /api/pricing/{id}
//! GET|POST       /api/projects
//! GET            /api/projects/metadata?url=
//! PUT|DELETE     /api/projects/{id}
//! GET|POST       /api/social-links
//! PUT|DELETE     /api/social-links/{id}
//! ```

pub mod auth;
pub mod contacts;
pub mod extract;
pub mod pricing;
pub mod projects;
pub mod social_links;
pub mod stats;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use serde::Serialize;
use serde_json::{Value, json};
use site_core::Resource;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::{AccessGuard, enforce_access, request_id_middleware};
use crate::state::AppState;

/// Response for deletes; `deleted` reports whether a row was removed.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: bool,
}

impl DeleteResponse {
    #[must_use]
    pub const fn new(deleted: bool) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}

/// Create the admin auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/verify", get(auth::verify))
        .route("/logout", post(auth::logout))
        .route("/credentials", put(auth::update_credentials))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::list).post(contacts::create))
        .route("/{id}", axum::routing::delete(contacts::delete))
}

/// Create the pricing routes router.
pub fn pricing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pricing::list).post(pricing::create))
        .route("/{id}", put(pricing::update).delete(pricing::delete))
}

/// Create the project routes router.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route("/metadata", get(projects::fetch_metadata))
        .route("/{id}", put(projects::update).delete(projects::delete))
}

/// Create the social link routes router.
pub fn social_link_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(social_links::list).post(social_links::create))
        .route("/{id}", put(social_links::update).delete(social_links::delete))
}

/// Wrap a resource router in the access policy for that resource.
fn guarded(state: &AppState, resource: Resource, router: Router<AppState>) -> Router<AppState> {
    router.layer(from_fn_with_state(
        AccessGuard::new(state.clone(), resource),
        enforce_access,
    ))
}

/// Create all API routes.
pub fn routes(state: &AppState) -> Router<AppState> {
    let resources = [
        (Resource::Contacts, contact_routes()),
        (Resource::Pricing, pricing_routes()),
        (Resource::Projects, project_routes()),
        (Resource::SocialLinks, social_link_routes()),
    ];

    resources.into_iter().fold(
        Router::new()
            .nest("/api/admin/auth", auth_routes())
            .route("/api/admin/stats", get(stats::show)),
        |router, (resource, resource_router)| {
            router.nest(
                &format!("/api/{}", resource.path_segment()),
                guarded(state, resource, resource_router),
            )
        },
    )
}

/// Build the complete application: routes, health checks, and the
/// middleware stack (everything except the Sentry layers).
pub fn app(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes(&state))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        #[allow(clippy::cast_possible_truncation)]
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns `{"status": "ok"}` if the server is running. Does not check
/// dependencies.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed: database unreachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;
    use crate::db::test_support;
    use crate::models::AdminIdentity;

    const JWT_SECRET: &str = "r0uter-t3sts-Qm8vX2kLp9Zr4Tn7Wd1Hy6";

    async fn test_state() -> AppState {
        let config = ServerConfig::from_lookup(|key| {
            (key == "JWT_SECRET").then(|| JWT_SECRET.to_string())
        })
        .unwrap();
        AppState::new(config, test_support::pool().await).unwrap()
    }

    fn admin_token(state: &AppState) -> String {
        state
            .tokens()
            .issue(&AdminIdentity {
                id: site_core::AdminId::new(1),
                username: "admin".to_string(),
            })
            .unwrap()
    }

    async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    #[tokio::test]
    async fn test_health_and_request_id() {
        let state = test_state().await;
        let (status, headers, body) = send(&state, Method::GET, "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_public_list_needs_no_token() {
        let state = test_state().await;
        for uri in ["/api/pricing", "/api/projects", "/api/social-links"] {
            let (status, _, body) = send(&state, Method::GET, uri, None, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, json!([]), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_operations_need_token() {
        let state = test_state().await;

        let (status, _, body) = send(&state, Method::GET, "/api/contacts", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "No token provided" }));

        let (status, _, body) = send(
            &state,
            Method::POST,
            "/api/pricing",
            Some("not-a-token"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid token" }));

        let (status, _, _) = send(&state, Method::DELETE, "/api/social-links/1", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(
            &state,
            Method::GET,
            "/api/projects/metadata?url=http://example.com",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_contact_create_is_public_and_validated() {
        let state = test_state().await;

        let (status, _, body) = send(
            &state,
            Method::POST,
            "/api/contacts",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "All fields are required" }));

        let (status, _, body) = send(
            &state,
            Method::POST,
            "/api/contacts",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com", "message": "Hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["contact"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_admin_token_unlocks_routes() {
        let state = test_state().await;
        let token = admin_token(&state);

        let (status, _, body) =
            send(&state, Method::GET, "/api/contacts", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _, body) =
            send(&state, Method::DELETE, "/api/pricing/42", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "deleted": false }));

        let (status, _, body) =
            send(&state, Method::GET, "/api/admin/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "contacts": 0, "pricing": 0, "projects": 0, "socialLinks": 0 })
        );
    }

    #[tokio::test]
    async fn test_readiness_reports_closed_pool() {
        let state = test_state().await;
        let (status, _, _) = send(&state, Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);

        state.pool().close().await;
        let (status, _, _) = send(&state, Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_bad_query_string_uses_error_shape() {
        let state = test_state().await;
        let token = admin_token(&state);

        let (status, headers, body) = send(
            &state,
            Method::GET,
            "/api/projects/metadata?url=http://a.example&url=http://b.example",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("application/json")
        );
        assert!(body["error"].as_str().unwrap().contains("duplicate field"));
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_shape() {
        let state = test_state().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contacts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }
}
