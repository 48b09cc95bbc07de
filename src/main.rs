use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use transfer_market::{
    ListingFilter, Result, TransferMarket,
    config::{database, market},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Market settings
    let config = market::load_default_config()
        .inspect_err(|e| error!("Failed to load market configuration: {}", e))?;

    // 4. Database and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    let market = TransferMarket::new(db, config);
    let open = market.list_listings(&ListingFilter::default()).await?;
    info!("Transfer market ready with {} open listings", open.len());

    Ok(())
}
