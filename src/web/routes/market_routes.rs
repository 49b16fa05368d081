use axum::{
    Json, Router,
    extract::{Query, rejection::QueryRejection},
    routing::post,
};
use std::sync::Arc;

use crate::services::market_service::{self, MarketAnalysis};
use crate::web::models::MarketAnalysisQuery;
use crate::web::{AppError, AppState};

// `text` travels in the query string, not the body.
async fn market_analysis_handler(
    query: Result<Query<MarketAnalysisQuery>, QueryRejection>,
) -> Result<Json<MarketAnalysis>, AppError> {
    let Query(params) = query?;
    let analysis = market_service::analyze_market(&params.text, &mut rand::rng());
    Ok(Json(analysis))
}

pub fn create_market_router() -> Router<Arc<AppState>> {
    Router::new().route("/market_analysis", post(market_analysis_handler))
}
