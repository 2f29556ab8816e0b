//! Confidence in an outbreak prediction

use super::{mean, round_to};
use crate::models::EnvironmentalRiskFactor;

pub const MIN_PREDICTION_CONFIDENCE: f64 = 0.6;
pub const MAX_PREDICTION_CONFIDENCE: f64 = 0.95;
/// Qualifying threats above which the prediction gains a bonus
const MANY_THREATS: usize = 5;

/// `0.75 + 0.15 * avg(contribution)`, scaled by forecast confidence,
/// plus 0.05 when more than five threats qualified
pub fn estimate_confidence(
    factors: &[EnvironmentalRiskFactor],
    forecast_confidence: f64,
    qualifying_threats: usize,
) -> f64 {
    let contributions: Vec<f64> = factors.iter().map(|f| f.risk_contribution).collect();
    let forecast_confidence = if forecast_confidence.is_finite() {
        forecast_confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut confidence = (0.75 + 0.15 * mean(&contributions)) * forecast_confidence;
    if qualifying_threats > MANY_THREATS {
        confidence += 0.05;
    }
    round_to(
        confidence.clamp(MIN_PREDICTION_CONFIDENCE, MAX_PREDICTION_CONFIDENCE),
        3,
    )
}
