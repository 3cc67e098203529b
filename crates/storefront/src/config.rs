//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: `PORT`, then 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding persisted carts (default: data)
//! - `STOREFRONT_STATIC_DIR` - Directory served at `/` (default: dist)
//! - `STOREFRONT_CATALOG_PATH` - Product and coupon catalog JSON (default: data/catalog.json)
//! - `STOREFRONT_SHIPPING_THRESHOLD` - Item total from which shipping is free (default: 50)
//! - `STOREFRONT_SHIPPING_COST` - Flat shipping surcharge (default: 9)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use webshop_core::{Price, ShippingPolicy};

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
    /// Root directory for persisted carts
    pub data_dir: PathBuf,
    /// Directory with the built client application
    pub static_dir: PathBuf,
    /// Product and coupon catalog file
    pub catalog_path: PathBuf,
    /// Shipping surcharge rules applied to every cart
    pub shipping: ShippingPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = match get_optional_env("STOREFRONT_PORT") {
            Some(port) => parse_value("STOREFRONT_PORT", &port)?,
            None => parse_env("PORT", "3000")?,
        };
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", "data"));
        let static_dir = PathBuf::from(get_env_or_default("STOREFRONT_STATIC_DIR", "dist"));
        let catalog_path = get_optional_env("STOREFRONT_CATALOG_PATH")
            .map_or_else(|| data_dir.join("catalog.json"), PathBuf::from);

        let defaults = ShippingPolicy::default();
        let shipping = ShippingPolicy::new(
            parse_price("STOREFRONT_SHIPPING_THRESHOLD", defaults.threshold)?,
            parse_price("STOREFRONT_SHIPPING_COST", defaults.cost)?,
        );

        Ok(Self {
            host,
            port,
            data_dir,
            static_dir,
            catalog_path,
            shipping,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Directory holding the carts.
    #[must_use]
    pub fn carts_dir(&self) -> PathBuf {
        self.data_dir.join("carts")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a raw value, naming the variable it came from on failure.
fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

/// Parse a non-negative price from the environment.
fn parse_price(key: &str, default: Price) -> Result<Price, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };

    let price: Price = parse_value(key, &raw)?;
    if price < Price::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(price)
}
