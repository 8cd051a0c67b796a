use color_eyre::eyre::Result;
use dotenv::dotenv;
use rsvp_api::config::ApiConfig;
use rsvp_db::create_pool;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Schema bootstrap happens inside start_server
    rsvp_api::start_server(config, db_pool).await?;

    Ok(())
}
