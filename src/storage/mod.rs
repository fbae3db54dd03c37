//! Persistence layer: connection pool, migrations, and repositories.

mod migrations;
mod pool;
pub mod repositories;

pub use migrations::run_migrations;
pub use pool::{create_pool, DbPool};
