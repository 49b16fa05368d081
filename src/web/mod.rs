use axum::{Router, response::IntoResponse, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::data::Snapshot;
use crate::web::routes::*;

pub use error::AppError;

pub mod error;
pub mod models;
pub mod routes;

/// Shared by every handler. The snapshot is read-only, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<Snapshot>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

async fn not_found_handler() -> impl IntoResponse {
    AppError::NotFound("no route matches this path".to_string())
}

pub fn create_axum_router(snapshot: Arc<Snapshot>) -> Router {
    let app_state = Arc::new(AppState { snapshot });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check_handler))
        .merge(data_routes::create_data_router())
        .merge(inventory_routes::create_inventory_router())
        .merge(forecast_routes::create_forecast_router())
        .merge(market_routes::create_market_router())
        .fallback(not_found_handler)
        .with_state(app_state)
        .layer(cors)
}
