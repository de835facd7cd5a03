//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `DATABASE_URL` - `SQLite` connection string (default: `sqlite://sqlite.db`)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3001)
//! - `TOKEN_TTL_HOURS` - Admin token lifetime in hours (default: 24)
//! - `MAX_BODY_BYTES` - Request body limit (default: 50 MiB)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default `SQLite` database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sqlite.db";

/// Default request body limit; inline base64 images make project payloads large.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Admin token signing secret
    pub jwt_secret: SecretString,
    /// Admin token lifetime in hours
    pub token_ttl_hours: u32,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let database_url = SecretString::from(env.or_default("DATABASE_URL", DEFAULT_DATABASE_URL));
        let host = env.parsed("HOST", "0.0.0.0")?;
        let port = env.parsed("PORT", "3001")?;
        let jwt_secret = env.validated_secret("JWT_SECRET")?;
        validate_jwt_secret(&jwt_secret, "JWT_SECRET")?;
        let token_ttl_hours: u32 = env.parsed("TOKEN_TTL_HOURS", "24")?;
        if token_ttl_hours == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TOKEN_TTL_HOURS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let max_body_bytes = env.parsed("MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string())?;
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_hours,
            max_body_bytes,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Admin token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.token_ttl_hours))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors. Empty values count as unset.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required environment variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an environment variable, falling back to a default.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Load and validate a secret.
    fn validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
}

/// Validate that a signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
