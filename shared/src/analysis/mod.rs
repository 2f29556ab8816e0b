//! Deterministic vegetation and outbreak-risk calculators
//!
//! Every function here is pure: identical inputs always produce identical
//! outputs and nothing performs I/O, so callers may fan work out across
//! threads freely.

mod confidence;
mod environment;
mod field;
mod health;
mod indices;
mod irrigation;
mod outbreak;
mod risk_level;
mod statistics;
mod stress_trend;

pub use confidence::*;
pub use environment::*;
pub use field::*;
pub use health::*;
pub use indices::*;
pub use irrigation::*;
pub use outbreak::*;
pub use risk_level::*;
pub use statistics::*;
pub use stress_trend::*;

/// Round to a fixed number of decimal places for stable comparison
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Replace NaN and infinities with zero
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub(crate) fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
