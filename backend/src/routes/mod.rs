//! Route definitions for the Kisan Express advisory backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather resolution with provider fallback
        .route("/weather", get(handlers::get_weather))
        // Crop advisory
        .route("/crop-suggest", post(handlers::suggest_crops))
        // Expert query
        .route("/query", post(handlers::ask_query))
}
