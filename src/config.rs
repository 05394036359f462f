//! Application configuration loaded from environment variables.
//!
//! Secrets (the token signing key) are read once at startup and handed to
//! the services that need them; nothing reads the environment afterwards.

use std::env;

/// Default TTL for issued session tokens (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Path of the embedded account database
    pub database_path: String,
    /// Base URL of the transaction (ledger) service
    pub ledger_base_url: String,
    /// Base URL of the budget service
    pub budget_base_url: String,

    // --- Secrets ---
    /// Signing key for session tokens (raw bytes)
    pub token_signing_key: Vec<u8>,
    /// Lifetime of issued session tokens, in seconds
    pub token_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `TOKEN_SIGNING_KEY` is required; everything else has a local-dev
    /// default. The ledger/budget defaults match the ports the services
    /// bind in a local compose setup.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/accounts.redb".to_string()),
            ledger_base_url: env::var("LEDGER_SERVICE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            budget_base_url: env::var("BUDGET_SERVICE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8083".to_string()),

            token_signing_key: env::var("TOKEN_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("TOKEN_SIGNING_KEY"))?
                .into_bytes(),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            database_path: "data/accounts-test.redb".to_string(),
            ledger_base_url: "http://localhost:8082".to_string(),
            budget_base_url: "http://localhost:8083".to_string(),
            token_signing_key: b"test_signing_key_32_bytes_long!!".to_vec(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("TOKEN_SIGNING_KEY", "test_signing_key_32_bytes_long!!");
        env::set_var("LEDGER_SERVICE_URL", "http://ledger:8082/");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.ledger_base_url, "http://ledger:8082");
        assert_eq!(config.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
        assert!(!config.token_signing_key.is_empty());
    }
}
