use axum::{Json, Router, extract::Path, routing::get};
use std::sync::Arc;
use tracing::debug;

use crate::services::forecast_service::{self, ForecastPoint};
use crate::web::AppState;

async fn forecast_handler(Path(product_id): Path<String>) -> Json<Vec<ForecastPoint>> {
    debug!(product_id = %product_id, "Generating simulated forecast.");
    let points = forecast_service::simulate_forecast(&mut rand::rng());
    Json(points)
}

pub fn create_forecast_router() -> Router<Arc<AppState>> {
    Router::new().route("/forecast/{product_id}", get(forecast_handler))
}
