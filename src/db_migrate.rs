use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use rsvp_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt().init();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(1);

    tracing::info!("Connecting to database...");
    let db_pool = rsvp_db::create_pool(&database_url, max_connections).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}
