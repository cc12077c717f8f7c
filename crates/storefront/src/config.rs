//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MINI_SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `MINI_SHOP_PORT` - Listen port (default: 3000)
//! - `MINI_SHOP_DATA_DIR` - Directory for the persisted cart (default: in-memory)
//! - `MINI_SHOP_CURRENCY` - ISO 4217 code used for display (default: INR)
//! - `MINI_SHOP_CATALOG_SIZE` - Number of generated products, 1-100 (default: 12)
//! - `JOKE_API_URL` - Joke endpoint (default: jokeapi.dev single joke)
//! - `QUIZ_BANK_PATH` - YAML question bank (default: built-in bank)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use mini_shop_core::CurrencyCode;
use thiserror::Error;

use crate::catalog::DEFAULT_CATALOG_SIZE;
use crate::services::DEFAULT_JOKE_API_URL;

const MAX_CATALOG_SIZE: usize = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for the device-scoped blob store; `None` keeps the cart in memory
    pub data_dir: Option<PathBuf>,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Number of products generated per session
    pub catalog_size: usize,
    /// Joke API endpoint
    pub joke_api_url: String,
    /// YAML question bank; `None` uses the built-in bank
    pub quiz_bank_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: None,
            currency: CurrencyCode::default(),
            catalog_size: DEFAULT_CATALOG_SIZE,
            joke_api_url: DEFAULT_JOKE_API_URL.to_string(),
            quiz_bank_path: None,
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
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(&lookup, "MINI_SHOP_HOST", defaults.host)?;
        let port = parse_or(&lookup, "MINI_SHOP_PORT", defaults.port)?;
        let currency = match non_empty(&lookup, "MINI_SHOP_CURRENCY") {
            Some(raw) => raw.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("MINI_SHOP_CURRENCY".to_string(), e)
            })?,
            None => defaults.currency,
        };

        let catalog_size = parse_or(&lookup, "MINI_SHOP_CATALOG_SIZE", defaults.catalog_size)?;
        if !(1..=MAX_CATALOG_SIZE).contains(&catalog_size) {
            return Err(ConfigError::InvalidEnvVar(
                "MINI_SHOP_CATALOG_SIZE".to_string(),
                format!("must be between 1 and {MAX_CATALOG_SIZE} (got {catalog_size})"),
            ));
        }

        Ok(Self {
            host,
            port,
            data_dir: non_empty(&lookup, "MINI_SHOP_DATA_DIR").map(PathBuf::from),
            currency,
            catalog_size,
            joke_api_url: non_empty(&lookup, "JOKE_API_URL").unwrap_or(defaults.joke_api_url),
            quiz_bank_path: non_empty(&lookup, "QUIZ_BANK_PATH").map(PathBuf::from),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable, treating an empty value as unset.
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    non_empty(lookup, key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.catalog_size, 12);
        assert_eq!(config.currency, CurrencyCode::INR);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MINI_SHOP_HOST", "0.0.0.0"),
            ("MINI_SHOP_PORT", "8080"),
            ("MINI_SHOP_DATA_DIR", "/var/lib/mini-shop"),
            ("MINI_SHOP_CURRENCY", "usd"),
            ("MINI_SHOP_CATALOG_SIZE", "24"),
            ("JOKE_API_URL", "http://localhost:9999/joke"),
            ("QUIZ_BANK_PATH", "quiz.yaml"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/mini-shop")));
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.catalog_size, 24);
        assert_eq!(config.joke_api_url, "http://localhost:9999/joke");
        assert_eq!(config.quiz_bank_path, Some(PathBuf::from("quiz.yaml")));
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = load(&[("MINI_SHOP_PORT", ""), ("MINI_SHOP_DATA_DIR", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("MINI_SHOP_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MINI_SHOP_PORT"));
    }

    #[test]
    fn test_invalid_currency() {
        assert!(load(&[("MINI_SHOP_CURRENCY", "XYZ")]).is_err());
    }

    #[test]
    fn test_catalog_size_bounds() {
        assert!(load(&[("MINI_SHOP_CATALOG_SIZE", "0")]).is_err());
        assert!(load(&[("MINI_SHOP_CATALOG_SIZE", "101")]).is_err());
        assert!(load(&[("MINI_SHOP_CATALOG_SIZE", "100")]).is_ok());
    }
}
