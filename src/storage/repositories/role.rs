//! Role repository.

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::instrument;

use crate::domain::{Role, RoleId};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct RoleRow {
    pub id: i64,
    pub name: String,
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Look up a role by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>>;
}

#[derive(Debug, Clone)]
pub struct SqlxRoleRepository {
    pool: DbPool,
}

impl SqlxRoleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for SqlxRoleRepository {
    #[instrument(skip(self), fields(role_name = %name), name = "db_find_role_by_name")]
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to fetch role by name".to_string(),
            })?;

        Ok(row.map(|r| Role { id: RoleId::new(r.id), name: r.name }))
    }
}
