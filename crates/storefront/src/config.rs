//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MINIMART_HOST` - Bind address (default: 127.0.0.1)
//! - `MINIMART_PORT` - Listen port (default: 8080)
//! - `MINIMART_DEMO_OWNER` - Owner key for cart requests (default: 1)
//! - `MINIMART_SEED_CATALOG` - Seed the demo products on start-up (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use minimart_core::UserId;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DEMO_OWNER: &str = "1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Owner key used for every cart request
    pub demo_owner: UserId,
    /// Whether to seed the demo catalog at start-up
    pub seed_catalog: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            demo_owner: UserId::new(DEFAULT_DEMO_OWNER),
            seed_catalog: true,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("MINIMART_HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("MINIMART_HOST".to_string(), e.to_string())
            })?,
            None => defaults.host,
        };
        let port = match lookup("MINIMART_PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("MINIMART_PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };
        let demo_owner = match lookup("MINIMART_DEMO_OWNER") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "MINIMART_DEMO_OWNER".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(value) => UserId::new(value),
            None => defaults.demo_owner,
        };
        let seed_catalog = match lookup("MINIMART_SEED_CATALOG") {
            Some(value) => parse_bool("MINIMART_SEED_CATALOG", &value)?,
            None => defaults.seed_catalog,
        };

        Ok(Self {
            host,
            port,
            demo_owner,
            seed_catalog,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
