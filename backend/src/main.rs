//! Kisan Express - Advisory Backend Server
//!
//! A thin, stateless API for Kerala farmers: district weather lookups
//! with a two-tier provider fallback, and crop advice from a generative
//! model with a rule-based degrade path.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod regions;
mod routes;
mod services;

pub use config::Config;

use regions::RegionTable;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub regions: Arc<RegionTable>,
    /// Shared outbound HTTP client with the configured timeout
    pub http: reqwest::Client,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kisan_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Kisan Express Advisory Server");
    tracing::info!("Environment: {}", config.environment);
    if config.weatherapi_key().is_none() {
        tracing::info!("No weatherapi.com key configured; weather requests go straight to Open-Meteo");
    }
    if config.gemini_key().is_none() {
        tracing::info!("No Gemini key configured; crop advice uses the rule-based generator");
    }

    // One pooled client for all outbound calls; the timeout applies to
    // every provider and model request alike
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http.timeout_seconds))
        .build()?;

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        regions: Arc::new(RegionTable::kerala()),
        http,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Kisan Express Advisory API v1.0"
}
