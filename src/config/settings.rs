//! Environment-driven application settings.
//!
//! Every section exposes a `from_env()` constructor with sensible defaults so
//! the binary can start with nothing but a database URL. Variables use the
//! `CMS_` prefix.

use std::time::Duration;

use crate::errors::{Error, Result};

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self { server: ServerConfig::from_env()?, database: DatabaseConfig::from_env() })
    }
}

/// HTTP API server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let bind_address =
            std::env::var("CMS_API_BIND_ADDRESS").unwrap_or(defaults.bind_address);
        let port = match std::env::var("CMS_API_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::config(format!("Invalid CMS_API_PORT value: {}", raw)))?,
            Err(_) => defaults.port,
        };
        Ok(Self { bind_address, port })
    }
}

/// Database connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: Option<u64>,
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/cms.db".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: std::env::var("CMS_DATABASE_URL").unwrap_or(defaults.url),
            max_connections: std::env::var("CMS_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: std::env::var("CMS_DATABASE_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_connections),
            connect_timeout_seconds: std::env::var("CMS_DATABASE_CONNECT_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout_seconds),
            idle_timeout_seconds: std::env::var("CMS_DATABASE_IDLE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(defaults.idle_timeout_seconds),
            auto_migrate: std::env::var("CMS_DATABASE_AUTO_MIGRATE")
                .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
                .unwrap_or(defaults.auto_migrate),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_seconds.map(Duration::from_secs)
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }
}

/// Logging and tracing settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logs: false }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("CMS_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logs: std::env::var("CMS_LOG_JSON")
                .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
                .unwrap_or(defaults.json_logs),
        }
    }
}
