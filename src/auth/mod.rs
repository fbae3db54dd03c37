//! Authentication and authorization.
//!
//! HTTP Basic credentials are resolved into a [`Principal`](principal::Principal)
//! by [`AuthService`](service::AuthService) (employee store first, then client
//! store), and per-path role rules are enforced by the
//! [`middleware`](middleware) layers before any handler runs.

pub mod hashing;
pub mod middleware;
pub mod principal;
pub mod service;

pub use principal::{AuthError, Principal};
pub use service::AuthService;
