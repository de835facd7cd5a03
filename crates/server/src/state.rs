//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::auth::TokenKeys;
use crate::services::metadata::{MetadataClient, MetadataError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    tokens: TokenKeys,
    metadata: MetadataClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `SQLite` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound HTTP client cannot be built.
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Result<Self, MetadataError> {
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl());
        let metadata = MetadataClient::new()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                metadata,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get the admin token keys.
    #[must_use]
    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }

    /// Get the link metadata client.
    #[must_use]
    pub fn metadata(&self) -> &MetadataClient {
        &self.inner.metadata
    }
}
