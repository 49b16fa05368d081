use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use std::sync::Arc;
use tracing::info;

use crate::services::inventory_service;
use crate::web::AppState;
use crate::web::models::InventoryOptimizeResponse;

async fn inventory_optimize_handler(
    State(app_state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Json<InventoryOptimizeResponse> {
    let result = inventory_service::optimize(&app_state.snapshot, &product_id);
    if result.is_err() {
        info!(product_id = %product_id, "Inventory optimization requested for unknown product.");
    }
    Json(result.into())
}

pub fn create_inventory_router() -> Router<Arc<AppState>> {
    Router::new().route("/inventory_optimize/{product_id}", get(inventory_optimize_handler))
}
