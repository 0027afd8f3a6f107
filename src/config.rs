//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the coupon REST API (no trailing slash)
    pub api_base_url: String,
    /// Public URL this storefront is served from
    pub public_url: String,
    /// Server port
    pub port: u16,
    /// Lifetime of the persisted token cookie, in days
    pub token_cookie_days: i64,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:9".to_string(),
            public_url: "http://localhost:8080".to_string(),
            port: 8080,
            token_cookie_days: 30,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("API_BASE_URL"))?;
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid("API_BASE_URL", api_base_url));
        }

        Ok(Self {
            api_base_url,
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            token_cookie_days: env::var("TOKEN_COOKIE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(30),
        })
    }

    /// Session cookies are marked `Secure` when the storefront is served over HTTPS.
    pub fn secure_cookies(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
