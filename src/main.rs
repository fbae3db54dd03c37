use cms_backend::{
    api::start_api_server, config::ObservabilityConfig, observability::init_tracing,
    startup::ensure_bootstrap_admin, storage::create_pool, AppConfig, Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; a missing file is not an error
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let observability_config = ObservabilityConfig::from_env();
    init_tracing(&observability_config)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting CMS backend");

    let config = AppConfig::from_env()?;
    info!(
        bind_address = %config.server.bind_address,
        port = config.server.port,
        database_url = %config.database.url,
        "Configuration loaded"
    );

    let pool = create_pool(&config.database).await?;
    ensure_bootstrap_admin(&pool).await?;

    start_api_server(config.server, pool).await
}
