//! # RSVP Planner API
//!
//! The web server for the RSVP Planner: event creation and search, attendee
//! registration and availability updates, and event images.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract requests and call into the [`EventService`]
//! - **Middleware**: Error mapping to HTTP responses
//! - **Config**: Environment configuration
//!
//! Business rules live in `rsvp-core`; this crate only translates HTTP to service calls.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by every handler
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use rsvp_core::{service::EventService, store::ObjectStore};
use rsvp_db::{DbPool, PgEventStore, PgObjectStore, schema::initialize_database};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Event operations, backed by the configured event store
    pub events: EventService,
    /// Storage for event images
    pub images: Arc<dyn ObjectStore>,
}

impl ApiState {
    /// State backed by PostgreSQL for both events and images.
    pub fn postgres(db_pool: DbPool) -> Self {
        Self {
            events: EventService::new(Arc::new(PgEventStore::new(db_pool.clone()))),
            images: Arc::new(PgObjectStore::new(db_pool)),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}

/// Builds the application router with every route and the shared layers applied.
pub fn build_router(state: Arc<ApiState>, config: &config::ApiConfig) -> Router {
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Event and attendee endpoints
        .merge(routes::events::routes())
        // Event image endpoints
        .merge(routes::images::routes(config.max_image_bytes))
        .with_state(state);

    let app = match &config.cors_origins {
        Some(origins) if !origins.is_empty() => app.layer(cors_layer(origins)),
        _ => app,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    )
}

/// Starts the API server: logging, schema bootstrap, routes, then the listener.
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = rsvp_api::config::ApiConfig::from_env()?;
/// let db_pool = rsvp_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// rsvp_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    initialize_database(&db_pool)
        .await
        .wrap_err("Failed to initialize database schema")?;

    let state = Arc::new(ApiState::postgres(db_pool));
    let app = build_router(state, &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
