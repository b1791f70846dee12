//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GUESTBOOK_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; only required when `GUESTBOOK_STORE=postgres`)
//!
//! ## Optional
//! - `GUESTBOOK_STORE` - Entry store backend: `postgres` (default) or `memory`
//! - `GUESTBOOK_HOST` - Bind address (default: 127.0.0.1)
//! - `GUESTBOOK_PORT` - Listen port (default: 3000)
//! - `GUESTBOOK_MODERATOR_SECRET` - Secret that may delete any entry. Without
//!   it only per-entry delete tokens work, so seeded entries (which have no
//!   token) can only be removed with `guestbook-cli delete`
//! - `GUESTBOOK_ALLOWED_ORIGIN` - Origin allowed to call the API cross-site
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;
const MIN_MODERATOR_SECRET_LENGTH: usize = 16;

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
    "1234",
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

/// Which entry store backend to run against.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// `PostgreSQL` via a connection pool (URL contains password).
    Postgres { database_url: SecretString },
    /// Process-local store; contents are lost on restart.
    Memory,
}

/// Guestbook server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Entry store backend
    pub store: StoreBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Secret allowed to delete any entry; `None` means only capability tokens work
    pub moderator_secret: Option<SecretString>,
    /// Origin permitted to call the API from a browser on another host
    pub allowed_origin: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the moderator secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = match get_env_or_default("GUESTBOOK_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: get_database_url("GUESTBOOK_DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "GUESTBOOK_STORE".to_string(),
                    format!("expected 'postgres' or 'memory', got '{other}'"),
                ));
            }
        };
        let host = get_env_or_default("GUESTBOOK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUESTBOOK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GUESTBOOK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUESTBOOK_PORT".to_string(), e.to_string()))?;

        let moderator_secret = get_optional_env("GUESTBOOK_MODERATOR_SECRET")
            .map(|value| validate_moderator_secret(value, "GUESTBOOK_MODERATOR_SECRET"))
            .transpose()?;

        Ok(Self {
            store,
            host,
            port,
            moderator_secret,
            allowed_origin: get_optional_env("GUESTBOOK_ALLOWED_ORIGIN"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for an in-memory server bound to an ephemeral local port.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: StoreBackend::Memory,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            moderator_secret: None,
            allowed_origin: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Operator warning when tokenless entries cannot be deleted over HTTP.
    #[must_use]
    pub const fn moderation_warning(&self) -> Option<&'static str> {
        if self.moderator_secret.is_some() {
            return None;
        }
        Some(
            "GUESTBOOK_MODERATOR_SECRET is not set; entries without a delete token \
             (seeded or legacy rows) cannot be deleted through the API",
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
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
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject short, placeholder, or low-entropy moderator secrets.
fn validate_moderator_secret(value: String, var_name: &str) -> Result<SecretString, ConfigError> {
    if value.chars().count() < MIN_MODERATOR_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_MODERATOR_SECRET_LENGTH} characters"),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(&value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_moderation_warning_only_without_secret() {
        let mut config = ServerConfig::in_memory();
        assert!(
            config
                .moderation_warning()
                .is_some_and(|w| w.contains("GUESTBOOK_MODERATOR_SECRET"))
        );

        config.moderator_secret = Some(SecretString::from("aB3$xY9!mK2@nL5#pQ7&"));
        assert!(config.moderation_warning().is_none());
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_moderator_secret_rejects_original_demo_password() {
        let err = validate_moderator_secret("1234".to_string(), "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_moderator_secret_rejects_placeholder() {
        let result = validate_moderator_secret("changeme-changeme-42".to_string(), "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_moderator_secret_rejects_low_entropy() {
        let result = validate_moderator_secret("abababababababababab".to_string(), "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_moderator_secret_accepts_random_value() {
        let secret =
            validate_moderator_secret("aB3$xY9!mK2@nL5#pQ7&".to_string(), "TEST_VAR").unwrap();
        assert_eq!(secret.expose_secret(), "aB3$xY9!mK2@nL5#pQ7&");
    }

    #[test]
    fn test_in_memory_config() {
        let config = ServerConfig::in_memory();
        assert!(matches!(config.store, StoreBackend::Memory));
        assert_eq!(config.socket_addr().port(), 0);
        assert!(config.moderator_secret.is_none());
    }
}
