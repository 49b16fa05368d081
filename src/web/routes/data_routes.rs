use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use tracing::debug;

use crate::web::AppState;
use crate::web::models::AllDataResponse;

async fn get_all_data_handler(State(app_state): State<Arc<AppState>>) -> Json<AllDataResponse> {
    debug!(rows = app_state.snapshot.len(), "Serving full dataset.");
    Json(AllDataResponse(app_state.snapshot.clone()))
}

pub fn create_data_router() -> Router<Arc<AppState>> {
    Router::new().route("/all_data", get(get_all_data_handler))
}
