//! BCrypt password hashing helpers.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::{Error, Result};

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST)
        .map_err(|err| Error::internal(format!("Failed to hash password: {}", err)))
}

/// Verify a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    verify(password, stored_hash)
        .map_err(|err| Error::internal(format!("Failed to verify password: {}", err)))
}
