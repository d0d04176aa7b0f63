//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GEMINI_API_KEY` - API key for the recipe generator
//!
//! ## Optional
//! - `GEMINI_MODEL` - Generator model name (default: gemini-3-flash-preview)
//! - `GEOCODER_BASE_URL` - Nominatim endpoint
//!   (default: <https://nominatim.openstreetmap.org>)
//! - `GEOCODER_USER_AGENT` - Identifying user agent Nominatim requires
//!   (default: portion-perfect/0.1)
//! - `NOTIFICATION_TTL_SECS` - Toast auto-expiry in seconds (default: 5)
//! - `SESSION_CACHE_CAPACITY` - Bound on cached per-shop order lists
//!   (default: 64)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Recipe generator API key (secret).
    pub gemini_api_key: SecretString,
    /// Recipe generator model name.
    pub gemini_model: String,
    /// Geocoder endpoint.
    pub geocoder_base_url: String,
    /// User agent sent to the geocoder.
    pub geocoder_user_agent: String,
    /// How long a toast stays visible.
    pub notification_ttl: Duration,
    /// Bound on cached per-shop order lists.
    pub session_cache_capacity: u64,
}

impl SyncConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is unset and
    /// `ConfigError::InvalidEnvVar` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_key: SecretString::from(require("GEMINI_API_KEY")?),
            gemini_model: optional("GEMINI_MODEL")
                .unwrap_or_else(|| "gemini-3-flash-preview".to_owned()),
            geocoder_base_url: optional("GEOCODER_BASE_URL")
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org".to_owned()),
            geocoder_user_agent: optional("GEOCODER_USER_AGENT")
                .unwrap_or_else(|| "portion-perfect/0.1".to_owned()),
            notification_ttl: Duration::from_secs(parse_or(
                "NOTIFICATION_TTL_SECS",
                5,
            )?),
            session_cache_capacity: parse_or("SESSION_CACHE_CAPACITY", 64)?,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    optional(name).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))
    })
}
