//! Startup provisioning: seed the default admin account.

use tracing::info;

use crate::errors::Result;
use crate::services::EmployeeService;
use crate::storage::DbPool;

/// Create the bootstrap admin account if it does not already exist. Runs on
/// every startup and is idempotent.
pub async fn ensure_bootstrap_admin(pool: &DbPool) -> Result<()> {
    let service = EmployeeService::with_sqlx(pool.clone());
    service.ensure_bootstrap_admin().await?;
    info!("Startup provisioning complete");
    Ok(())
}
