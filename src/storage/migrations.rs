//! Embedded schema migrations.
//!
//! Migrations live under `migrations/` and are compiled into the binary, so
//! deployments never depend on files shipped next to the executable. They run
//! automatically on startup when `auto_migrate` is enabled.

use crate::errors::{Error, Result};
use crate::storage::DbPool;
use tracing::info;

/// Apply all pending migrations to the given pool.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| Error::Database {
        source: sqlx::Error::Migrate(Box::new(e)),
        context: "Failed to run database migrations".to_string(),
    })?;

    info!("Database migrations applied");
    Ok(())
}
