//! Client lifecycle operations: onboarding, record updates, status review,
//! and password changes.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::hashing;
use crate::domain::{
    Client, ClientId, ClientStatus, CreateClientRequest, NewClient, UpdateClient, CLIENT_ROLE,
};
use crate::errors::{AuthErrorType, Error, Result};
use crate::storage::repositories::{
    ClientRepository, RoleRepository, SqlxClientRepository, SqlxRoleRepository,
};
use crate::storage::DbPool;

/// Password assigned to every newly onboarded client. Clients are expected to
/// change it through the password change endpoint.
pub const DEFAULT_CLIENT_PASSWORD: &str = "defaultClientPassword";

pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { clients, roles }
    }

    /// Convenience constructor wiring the sqlx-backed repositories.
    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(
            Arc::new(SqlxClientRepository::new(pool.clone())),
            Arc::new(SqlxRoleRepository::new(pool)),
        )
    }

    /// Onboard a new client. The stored password is always the default and
    /// the status is always `Pending`; any status in the request is ignored.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client> {
        let password_hash = hashing::hash_password(DEFAULT_CLIENT_PASSWORD)?;
        let role = self
            .roles
            .find_by_name(CLIENT_ROLE)
            .await?
            .ok_or_else(|| Error::internal(format!("Role '{}' is not seeded", CLIENT_ROLE)))?;

        let client = self
            .clients
            .create(
                NewClient {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    username: request.username,
                    email: request.email,
                    password_hash,
                    ssn: request.ssn,
                    date_of_birth: request.date_of_birth,
                    status: ClientStatus::Pending,
                },
                role.id,
            )
            .await?;

        info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn get_client(&self, id: &ClientId) -> Result<Client> {
        self.clients
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found("Client", id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.clients.list().await
    }

    /// Overwrite the client's name and email. All other stored fields are
    /// left untouched.
    #[instrument(skip(self, update), fields(client_id = %id))]
    pub async fn update_client(&self, id: &ClientId, update: UpdateClient) -> Result<Client> {
        self.get_client(id).await?;
        self.clients.update(id, update).await
    }

    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn approve_client(&self, id: &ClientId) -> Result<Client> {
        self.get_client(id).await?;
        let client = self.clients.set_status(id, ClientStatus::Approved).await?;
        info!(client_id = %id, "Client approved");
        Ok(client)
    }

    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn reject_client(&self, id: &ClientId) -> Result<Client> {
        self.get_client(id).await?;
        let client = self.clients.set_status(id, ClientStatus::Rejected).await?;
        info!(client_id = %id, "Client rejected");
        Ok(client)
    }

    /// Delete a client. Deleting an unknown ID still succeeds.
    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn delete_client(&self, id: &ClientId) -> Result<()> {
        self.clients.delete(id).await?;
        info!(client_id = %id, "Client deleted");
        Ok(())
    }

    /// Change a client's password. Returns `Ok(false)` when the old password
    /// does not match the stored hash; the stored hash is left untouched.
    #[instrument(skip(self, old_password, new_password), fields(client_id = %id))]
    pub async fn change_password(
        &self,
        id: &ClientId,
        old_password: &str,
        new_password: &str,
    ) -> Result<bool> {
        let (_, password_hash) = self.clients.get_with_password(id).await?.ok_or_else(|| {
            Error::auth(
                format!("Client {} not found", id),
                AuthErrorType::PrincipalNotFound,
            )
        })?;

        if !hashing::verify_password(old_password, &password_hash)? {
            return Ok(false);
        }

        let new_hash = hashing::hash_password(new_password)?;
        self.clients.update_password(id, new_hash).await?;
        info!(client_id = %id, "Client password updated");
        Ok(true)
    }
}
