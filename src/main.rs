//! farmsync server binary.

use dotenvy::dotenv;
use farmsync::config::{self, AppConfig};
use farmsync::{api, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Resolve configuration
    let app_config = AppConfig::from_env()?;
    info!("Loaded configuration (database: {})", app_config.database_url);

    // 4. Connect and ensure tables exist
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Serve
    let app = api::router(db);
    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr).await?;
    info!("farmsync API listening on {}", app_config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
