pub mod forecast_service;
pub mod inventory_service;
pub mod market_service;

pub use inventory_service::{InventoryError, InventoryRecommendation, optimize};
