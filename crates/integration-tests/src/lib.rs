//! End-to-end test harness for the site backend.
//!
//! [`TestContext::new`] gives every test its own world:
//!
//! - an in-memory `SQLite` database with migrations applied
//! - one admin account (`ADMIN_USERNAME` / `ADMIN_PASSWORD`)
//! - the full application router served on `127.0.0.1:<ephemeral>`
//! - a fixture server with HTML pages for the link preview lookup
//!
//! ```rust,ignore
//! let ctx = TestContext::new().await;
//! let token = ctx.login().await;
//! let (status, body) = ctx.get("/api/contacts", Some(&token)).await;
//! ```

use axum::{Router, response::Html, routing::get};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use site_server::config::ServerConfig;
use site_server::db::{self, AdminRepository};
use site_server::services::auth::hash_password;
use site_server::AppState;

/// Username of the seeded admin.
pub const ADMIN_USERNAME: &str = "admin";

/// Password of the seeded admin.
pub const ADMIN_PASSWORD: &str = "integration-pass-1";

/// Image advertised by the `/og` fixture page.
pub const FIXTURE_OG_IMAGE: &str = "http://i/p.png";

/// Image advertised by the `/twitter` fixture page.
pub const FIXTURE_TWITTER_IMAGE: &str = "http://i/t.png";

const JWT_SECRET: &str = "1ntegr4tion-Kq7vM2xLp9Zr4Tn8Wd3Hy6!";

/// A running server plus everything a test needs to talk to it.
pub struct TestContext {
    /// Plain HTTP client; tokens are sent per request.
    pub client: reqwest::Client,
    /// Base URL of the application, without a trailing slash.
    pub base_url: String,
    /// Base URL of the fixture page server.
    pub fixtures_url: String,
    /// The database behind the application.
    pub pool: SqlitePool,
}

impl TestContext {
    /// Start a fresh application and fixture server.
    ///
    /// # Panics
    ///
    /// Panics if the database, configuration or listeners cannot be set up.
    pub async fn new() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("in-memory pool should open");
        db::migrate(&pool).await.expect("migrations should apply");

        let hash = hash_password(ADMIN_PASSWORD).expect("password should hash");
        AdminRepository::new(&pool)
            .upsert(ADMIN_USERNAME, &hash)
            .await
            .expect("admin should be created");

        let config = ServerConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            _ => None,
        })
        .expect("test configuration should be valid");
        let state = AppState::new(config, pool.clone()).expect("state should build");

        let base_url = serve(site_server::app(state)).await;
        let fixtures_url = serve(fixture_pages()).await;

        Self {
            client: reqwest::Client::new(),
            base_url,
            fixtures_url,
            pool,
        }
    }

    /// Absolute URL for an application path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Absolute URL for a fixture page.
    #[must_use]
    pub fn fixture(&self, path: &str) -> String {
        format!("{}{path}", self.fixtures_url)
    }

    /// Log in as the seeded admin and return the bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login(&self) -> String {
        self.login_as(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("seeded admin should log in")
    }

    /// Log in with the given credentials; `None` if the server refuses.
    pub async fn login_as(&self, username: &str, password: &str) -> Option<String> {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/admin/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        if status != StatusCode::OK {
            return None;
        }
        body["token"].as_str().map(str::to_string)
    }

    /// Send a request and decode the JSON response (`Value::Null` when empty).
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level or the body is
    /// not JSON.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.expect("request should be sent");
        let status = response.status();
        let bytes = response.bytes().await.expect("body should be readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, json)
    }

    /// `GET` shorthand.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, path, token, None).await
    }

    /// `POST` shorthand.
    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, token, Some(body)).await
    }

    /// `PUT` shorthand.
    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, path, token, Some(body)).await
    }

    /// `DELETE` shorthand.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, path, token, None).await
    }
}

/// Serve a router on an ephemeral local port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener should have an address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test server should run");
    });

    format!("http://{addr}")
}

/// HTML pages for the link preview lookup.
fn fixture_pages() -> Router {
    Router::new()
        .route(
            "/og",
            get(|| async {
                Html(format!(
                    r#"<html><head>
<meta name="twitter:image" content="{FIXTURE_TWITTER_IMAGE}">
<meta property="og:image" content="{FIXTURE_OG_IMAGE}">
</head><body>og</body></html>"#
                ))
            }),
        )
        .route(
            "/twitter",
            get(|| async {
                Html(format!(
                    r#"<html><head><meta content='{FIXTURE_TWITTER_IMAGE}' name='twitter:image' /></head></html>"#
                ))
            }),
        )
        .route(
            "/plain",
            get(|| async { Html("<html><head><title>No preview</title></head></html>") }),
        )
}
