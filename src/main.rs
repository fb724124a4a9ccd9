use dotenvy::dotenv;
use shopfront::{
    config::{catalog, database, settings::AppConfig},
    errors::Result,
    http::{self, AppState},
    storage::ImageStore,
};
use std::sync::Arc;
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

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let config = AppConfig::load()?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database
    let db = database::create_connection(&config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the catalog (if a seed file is present)
    if config.catalog_path.exists() {
        let seed = catalog::load_config(&config.catalog_path)?;
        catalog::seed_catalog(&db, &seed)
            .await
            .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
    } else {
        info!("No catalog seed file at {:?}, skipping.", config.catalog_path);
    }

    // 6. Run the HTTP server
    let state = Arc::new(AppState::new(db, ImageStore::new(config.upload_dir.clone())));
    http::serve(&config, state).await?;

    Ok(())
}
