//! API configuration

use serde::Deserialize;
use std::fmt;

/// Storage backend behind the claim repository port
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStoreKind {
    /// PostgreSQL via `infra_db`
    #[default]
    Postgres,
    /// Process-local map; data is lost on restart
    Memory,
}

impl fmt::Display for ClaimStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimStoreKind::Postgres => f.write_str("postgres"),
            ClaimStoreKind::Memory => f.write_str("memory"),
        }
    }
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Repository adapter to run against
    pub store: ClaimStoreKind,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/claims".to_string(),
            store: ClaimStoreKind::Postgres,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset keys keep their defaults. `DATABASE_URL` is used when
    /// `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", database_url)?
            .set_default("store", defaults.store.to_string())?
            .set_default("log_level", defaults.log_level)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
