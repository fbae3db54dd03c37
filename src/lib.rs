//! # CMS Backend
//!
//! A client-management backend exposing a REST API for client and employee
//! lifecycle operations, guarded by HTTP Basic authentication and role-based
//! access control.
//!
//! ## Architecture
//!
//! ```text
//! REST API Layer → Services → Repositories → SQLite
//!      ↓
//! Authentication middleware (Basic credentials → Principal → role rules)
//! ```
//!
//! ## Core Components
//!
//! - **REST API**: Axum-based HTTP server under the `/cms` prefix
//! - **Services**: client and employee business logic, bootstrap provisioning
//! - **Persistence**: SQLx with SQLite, embedded migrations
//! - **Auth**: bcrypt-verified Basic credentials resolved against both stores

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod startup;
pub mod storage;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
