use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

use crate::data::Snapshot;
use crate::services::{InventoryError, InventoryRecommendation};

/// Body of `GET /all_data`: every snapshot row, in file order.
#[derive(Debug, Clone)]
pub struct AllDataResponse(pub Arc<Snapshot>);

impl Serialize for AllDataResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Snapshot::serialize(&self.0, serializer)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// An unknown product is reported in the body, not through the status code.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum InventoryOptimizeResponse {
    Recommendation(InventoryRecommendation),
    Error(ErrorResponse),
}

impl From<Result<InventoryRecommendation, InventoryError>> for InventoryOptimizeResponse {
    fn from(result: Result<InventoryRecommendation, InventoryError>) -> Self {
        match result {
            Ok(recommendation) => InventoryOptimizeResponse::Recommendation(recommendation),
            Err(e) => InventoryOptimizeResponse::Error(ErrorResponse {
                error: e.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarketAnalysisQuery {
    pub text: String,
}
