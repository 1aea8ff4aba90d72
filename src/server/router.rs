//! Route table for the catalog API

use super::handlers::{AppState, list_facets, list_vehicles, search};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build catalog routes
///
/// - GET /vehicles - Filtered, sorted, paginated listings
/// - GET /vehicles/facets - Values offered by the filter panel
/// - POST /search - Merge a free-text query into the given criteria
pub fn build_catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/facets", get(list_facets))
        .route("/search", post(search))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}
