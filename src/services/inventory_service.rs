use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::{ORDER_QUANTITIES_COLUMN, STOCK_LEVELS_COLUMN, Snapshot};

/// Stock level assumed when the product's mean stock is zero.
pub const DEFAULT_STOCK_LEVEL: f64 = 100.0;
/// Order quantity assumed when the product's mean order quantity is zero.
pub const DEFAULT_ORDER_QUANTITY: f64 = 80.0;

pub const SAFETY_STOCK_RATIO: f64 = 0.2;
pub const REORDER_POINT_RATIO: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecommendation {
    pub product_id: String,
    pub reorder_point: i64,
    pub safety_stock: i64,
    pub recommended_order_quantity: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Product not found")]
    ProductNotFound(String),
}

/// Derives reorder point, safety stock and order quantity for one product.
///
/// Pure function of the snapshot and the identifier. A zero mean (which the
/// loader also produces for missing data) falls back to the fixed defaults.
pub fn optimize(
    snapshot: &Snapshot,
    product_id: &str,
) -> Result<InventoryRecommendation, InventoryError> {
    let record = snapshot.product(product_id);
    if record.is_empty() {
        return Err(InventoryError::ProductNotFound(product_id.to_string()));
    }
    debug!(product_id, matched_rows = record.len(), "Optimizing inventory.");

    let stock = non_zero_or(record.mean(STOCK_LEVELS_COLUMN), DEFAULT_STOCK_LEVEL);
    let order = non_zero_or(record.mean(ORDER_QUANTITIES_COLUMN), DEFAULT_ORDER_QUANTITY);

    Ok(InventoryRecommendation {
        product_id: product_id.to_string(),
        reorder_point: truncate(stock * REORDER_POINT_RATIO),
        safety_stock: truncate(stock * SAFETY_STOCK_RATIO),
        recommended_order_quantity: truncate(order),
    })
}

fn non_zero_or(mean: Option<f64>, fallback: f64) -> f64 {
    match mean {
        Some(v) if v != 0.0 => v,
        _ => fallback,
    }
}

fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
