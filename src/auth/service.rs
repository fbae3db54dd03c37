//! Principal resolution for HTTP Basic authentication.
//!
//! The lookup is an ordered chain over two stores: employees are matched by
//! username or email, clients by username only. The first match wins.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::instrument;

use crate::auth::hashing;
use crate::auth::principal::{AuthError, Principal};
use crate::storage::repositories::{
    ClientRepository, EmployeeRepository, SqlxClientRepository, SqlxEmployeeRepository,
};
use crate::storage::DbPool;

/// Resolves `Authorization: Basic` headers into authenticated principals.
pub struct AuthService {
    employees: Arc<dyn EmployeeRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl AuthService {
    pub fn new(employees: Arc<dyn EmployeeRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { employees, clients }
    }

    /// Convenience constructor wiring the sqlx-backed repositories.
    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(
            Arc::new(SqlxEmployeeRepository::new(pool.clone())),
            Arc::new(SqlxClientRepository::new(pool)),
        )
    }

    /// Authenticate the raw `Authorization` header value.
    #[instrument(skip(self, header), name = "auth_service.authenticate")]
    pub async fn authenticate(&self, header: &str) -> Result<Principal, AuthError> {
        let (login, password) = decode_basic(header)?;

        if let Some((employee, password_hash)) =
            self.employees.find_by_username_or_email_with_password(&login).await?
        {
            if !hashing::verify_password(&password, &password_hash)? {
                return Err(AuthError::InvalidCredentials);
            }
            let grants = self.employees.list_roles(&employee.id).await?;
            return Ok(Principal::new(employee.username, grants));
        }

        // Clients are matched by username only, not email.
        let (client, password_hash) = self
            .clients
            .find_by_username_with_password(&login)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        if !hashing::verify_password(&password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        let grants = self.clients.list_roles(&client.id).await?;
        Ok(Principal::new(client.username, grants))
    }
}

/// Decode a `Basic` authorization header into a `(login, password)` pair.
fn decode_basic(header: &str) -> Result<(String, String), AuthError> {
    if header.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let encoded = header.strip_prefix("Basic ").ok_or(AuthError::MalformedCredentials)?;
    let decoded = BASE64.decode(encoded.trim()).map_err(|_| AuthError::MalformedCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;

    let (login, password) = decoded.split_once(':').ok_or(AuthError::MalformedCredentials)?;
    if login.is_empty() {
        return Err(AuthError::MalformedCredentials);
    }

    Ok((login.to_string(), password.to_string()))
}
