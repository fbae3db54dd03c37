//! Client repository: CRUD, status transitions, and credential lookups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use tracing::instrument;

use crate::domain::{Client, ClientId, ClientStatus, NewClient, RoleId, UpdateClient};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct ClientRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub ssn: String,
    pub date_of_birth: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const CLIENT_COLUMNS: &str = "id, first_name, last_name, username, email, password_hash, ssn, \
     date_of_birth, status, created_at, updated_at";

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Create a new client and assign the given role inside one transaction
    async fn create(&self, client: NewClient, role_id: RoleId) -> Result<Client>;

    /// Get a client by ID
    async fn get(&self, id: &ClientId) -> Result<Option<Client>>;

    /// Get a client with their password hash (for password changes)
    async fn get_with_password(&self, id: &ClientId) -> Result<Option<(Client, String)>>;

    /// Find a client by username with their password hash (for authentication)
    async fn find_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(Client, String)>>;

    /// List all clients (entire table, unrestricted)
    async fn list(&self) -> Result<Vec<Client>>;

    /// Overwrite the updatable record fields (name and email)
    async fn update(&self, id: &ClientId, update: UpdateClient) -> Result<Client>;

    /// Set the lifecycle status
    async fn set_status(&self, id: &ClientId, status: ClientStatus) -> Result<Client>;

    /// Replace the stored password hash
    async fn update_password(&self, id: &ClientId, password_hash: String) -> Result<()>;

    /// Delete a client by ID; deleting an absent ID is a no-op
    async fn delete(&self, id: &ClientId) -> Result<()>;

    /// List the role names assigned to a client
    async fn list_roles(&self, id: &ClientId) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct SqlxClientRepository {
    pool: DbPool,
}

impl SqlxClientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_client(&self, row: ClientRow) -> Result<Client> {
        let status = ClientStatus::from_str(&row.status).map_err(|_| {
            Error::validation(format!("Unknown client status '{}'", row.status))
        })?;

        Ok(Client {
            id: ClientId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            email: row.email,
            ssn: row.ssn,
            date_of_birth: row.date_of_birth,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ClientRepository for SqlxClientRepository {
    #[instrument(skip(self, client), fields(username = %client.username), name = "db_create_client")]
    async fn create(&self, client: NewClient, role_id: RoleId) -> Result<Client> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to begin client create transaction".to_string(),
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO clients (first_name, last_name, username, email, password_hash, ssn,
                                 date_of_birth, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.username)
        .bind(&client.email)
        .bind(&client.password_hash)
        .bind(&client.ssn)
        .bind(client.date_of_birth)
        .bind(client.status.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to create client".to_string(),
        })?;

        let id = ClientId::new(result.last_insert_rowid());

        sqlx::query("INSERT INTO client_roles (client_id, role_id) VALUES (?, ?)")
            .bind(id)
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to assign client role".to_string(),
            })?;

        tx.commit().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to commit client create transaction".to_string(),
        })?;

        self.get(&id).await?.ok_or_else(|| Error::internal("Client not found after creation"))
    }

    #[instrument(skip(self), fields(client_id = %id), name = "db_get_client")]
    async fn get(&self, id: &ClientId) -> Result<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE id = ?",
            CLIENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch client".to_string(),
        })?;

        row.map(|r| self.row_to_client(r)).transpose()
    }

    #[instrument(skip(self), fields(client_id = %id), name = "db_get_client_with_password")]
    async fn get_with_password(&self, id: &ClientId) -> Result<Option<(Client, String)>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE id = ?",
            CLIENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch client with password".to_string(),
        })?;

        if let Some(row) = row {
            let password_hash = row.password_hash.clone();
            let client = self.row_to_client(row)?;
            Ok(Some((client, password_hash)))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), fields(username = %username), name = "db_find_client_by_username")]
    async fn find_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(Client, String)>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE username = ?",
            CLIENT_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch client by username".to_string(),
        })?;

        if let Some(row) = row {
            let password_hash = row.password_hash.clone();
            let client = self.row_to_client(row)?;
            Ok(Some((client, password_hash)))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), name = "db_list_clients")]
    async fn list(&self) -> Result<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients ORDER BY id",
            CLIENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to list clients".to_string(),
        })?;

        rows.into_iter().map(|r| self.row_to_client(r)).collect()
    }

    #[instrument(skip(self, update), fields(client_id = %id), name = "db_update_client")]
    async fn update(&self, id: &ClientId, update: UpdateClient) -> Result<Client> {
        sqlx::query(
            r#"
            UPDATE clients
            SET first_name = ?, last_name = ?, email = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to update client".to_string(),
        })?;

        self.get(id).await?.ok_or_else(|| Error::internal("Client not found after update"))
    }

    #[instrument(skip(self), fields(client_id = %id, status = %status), name = "db_set_client_status")]
    async fn set_status(&self, id: &ClientId, status: ClientStatus) -> Result<Client> {
        sqlx::query("UPDATE clients SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to update client status".to_string(),
            })?;

        self.get(id)
            .await?
            .ok_or_else(|| Error::internal("Client not found after status update"))
    }

    #[instrument(skip(self, password_hash), fields(client_id = %id), name = "db_update_client_password")]
    async fn update_password(&self, id: &ClientId, password_hash: String) -> Result<()> {
        sqlx::query("UPDATE clients SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to update client password".to_string(),
            })?;

        Ok(())
    }

    #[instrument(skip(self), fields(client_id = %id), name = "db_delete_client")]
    async fn delete(&self, id: &ClientId) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to begin client delete transaction".to_string(),
        })?;

        sqlx::query("DELETE FROM client_roles WHERE client_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete client roles".to_string(),
            })?;

        sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete client".to_string(),
            })?;

        tx.commit().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to commit client delete transaction".to_string(),
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(client_id = %id), name = "db_list_client_roles")]
    async fn list_roles(&self, id: &ClientId) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name FROM roles r
            JOIN client_roles cr ON cr.role_id = r.id
            WHERE cr.client_id = ?
            ORDER BY r.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to list client roles".to_string(),
        })?;

        Ok(names)
    }
}
