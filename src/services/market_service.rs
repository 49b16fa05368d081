use rand::Rng;
use serde::{Deserialize, Serialize};

use super::forecast_service::round2;

const POSITIVE_KEYWORDS: [&str; 2] = ["good", "increase"];
const CONFIDENCE_MIN: f64 = 0.7;
const CONFIDENCE_MAX: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn suggested_action(self) -> &'static str {
        match self {
            Sentiment::Positive => "Increase inventory",
            Sentiment::Negative => "Review supply sources",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub suggested_action: String,
}

/// Keyword match, case-insensitive. Anything without a positive keyword is negative.
pub fn classify(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    if POSITIVE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    }
}

pub fn analyze_market<R: Rng + ?Sized>(text: &str, rng: &mut R) -> MarketAnalysis {
    let sentiment = classify(text);
    MarketAnalysis {
        sentiment,
        confidence: round2(rng.random_range(CONFIDENCE_MIN..CONFIDENCE_MAX)),
        suggested_action: sentiment.suggested_action().to_string(),
    }
}
