use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of daily points in every forecast.
pub const FORECAST_HORIZON_DAYS: u64 = 30;

const YHAT_MIN: f64 = 50.0;
const YHAT_MAX: f64 = 150.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: String,
    pub yhat: f64,
}

/// First forecast day. The placeholder model always starts on the same date.
pub fn forecast_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 8).unwrap_or_default()
}

/// Placeholder demand forecast: one uniformly random value per day.
///
/// The product is not consulted; no model is fitted.
pub fn simulate_forecast<R: Rng + ?Sized>(rng: &mut R) -> Vec<ForecastPoint> {
    let start = forecast_start();
    (0..FORECAST_HORIZON_DAYS)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|day| ForecastPoint {
            ds: day.format("%Y-%m-%d 00:00:00").to_string(),
            yhat: round2(rng.random_range(YHAT_MIN..YHAT_MAX)),
        })
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
