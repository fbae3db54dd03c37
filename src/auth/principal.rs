//! Authenticated principal and authentication pipeline errors.

use std::collections::HashSet;

use thiserror::Error;

use crate::errors::Error;

/// Request-scoped identity derived from valid Basic credentials.
///
/// Grants are the stored role names, carried 1:1. Route rules name bare roles
/// (`ADMIN`, `EMPLOYEE`, `CLIENT`) while the store may carry a `ROLE_` prefix,
/// so [`Principal::has_role`] accepts either form.
#[derive(Debug, Clone)]
pub struct Principal {
    pub username: String,
    grants: HashSet<String>,
}

impl Principal {
    pub fn new(username: String, grants: Vec<String>) -> Self {
        Self { username, grants: grants.into_iter().collect() }
    }

    /// Check whether the principal satisfies a role rule.
    pub fn has_role(&self, role: &str) -> bool {
        self.grants.contains(role) || self.grants.contains(&format!("ROLE_{}", role))
    }

    pub fn grants(&self) -> impl Iterator<Item = &String> {
        self.grants.iter()
    }
}

/// Errors returned by the authentication middleware/service.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized: basic credentials missing")]
    MissingCredentials,
    #[error("unauthorized: malformed basic credentials")]
    MalformedCredentials,
    #[error("unauthorized: principal not found")]
    PrincipalNotFound,
    #[error("unauthorized: invalid credentials")]
    InvalidCredentials,
    #[error("forbidden: missing required role")]
    Forbidden,
    #[error(transparent)]
    Persistence(#[from] Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_checks_accept_prefixed_and_bare_grants() {
        let principal =
            Principal::new("jsmith".into(), vec!["ROLE_EMPLOYEE".into(), "ADMIN".into()]);

        assert!(principal.has_role("EMPLOYEE"));
        assert!(principal.has_role("ROLE_EMPLOYEE"));
        assert!(principal.has_role("ADMIN"));
        assert!(!principal.has_role("CLIENT"));
        assert_eq!(principal.grants().count(), 2);
    }
}
