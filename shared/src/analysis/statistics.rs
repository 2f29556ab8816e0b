//! Per-field index statistics

use super::{mean, population_std_dev, round_to};
use crate::models::FieldIndexStatistics;

/// Upper NDVI bound (exclusive) of the bare-soil class
pub const BARE_SOIL_MAX_NDVI: f64 = 0.25;

const STAT_DECIMALS: i32 = 4;

/// Value at percentile `p` (0 to 100) of an ascending slice
///
/// Linear interpolation between the two closest ranks, `index = p/100 * (n-1)`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let index = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = index.floor() as usize;
            let upper = index.ceil() as usize;
            let weight = index - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

/// Whether a raw pixel value is usable, i.e. finite and within [-1, 1]
pub fn is_valid_index_value(value: f64) -> bool {
    value.is_finite() && (-1.0..=1.0).contains(&value)
}

/// Aggregate per-pixel index values for one field
///
/// Non-finite and out-of-range values are counted as cloudy. When nothing
/// survives filtering an all-zero record is returned.
pub fn aggregate_field_statistics(values: &[f64]) -> FieldIndexStatistics {
    let mut valid: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| is_valid_index_value(*v))
        .collect();

    if valid.is_empty() {
        return FieldIndexStatistics::empty(values.len());
    }

    valid.sort_by(|a, b| a.total_cmp(b));

    let mean = mean(&valid);
    let std_dev = population_std_dev(&valid, mean);
    let water_pixels = valid.iter().filter(|v| **v < 0.0).count();
    let bare_soil_pixels = valid
        .iter()
        .filter(|v| **v >= 0.0 && **v < BARE_SOIL_MAX_NDVI)
        .count();

    FieldIndexStatistics {
        mean: round_to(mean, STAT_DECIMALS),
        median: round_to(percentile(&valid, 50.0), STAT_DECIMALS),
        min: round_to(valid[0], STAT_DECIMALS),
        max: round_to(valid[valid.len() - 1], STAT_DECIMALS),
        std_dev: round_to(std_dev, STAT_DECIMALS),
        percentile_25: round_to(percentile(&valid, 25.0), STAT_DECIMALS),
        percentile_75: round_to(percentile(&valid, 75.0), STAT_DECIMALS),
        total_pixels: values.len(),
        valid_pixels: valid.len(),
        cloudy_pixels: values.len() - valid.len(),
        water_pixels,
        bare_soil_pixels,
    }
}
