//! Configuration management for the CMS backend.

mod settings;

pub use settings::{AppConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};
