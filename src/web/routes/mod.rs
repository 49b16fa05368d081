pub mod data_routes;
pub mod forecast_routes;
pub mod inventory_routes;
pub mod market_routes;
