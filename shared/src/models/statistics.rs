//! Per-field index statistics

use serde::{Deserialize, Serialize};

/// Distributional statistics of one index over the pixels of a field
///
/// `valid_pixels + cloudy_pixels == total_pixels`. Water and bare-soil pixels
/// are a subset of the valid pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FieldIndexStatistics {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub total_pixels: usize,
    pub valid_pixels: usize,
    pub cloudy_pixels: usize,
    pub water_pixels: usize,
    pub bare_soil_pixels: usize,
}

impl FieldIndexStatistics {
    /// Record for a field where no pixel survived filtering
    pub fn empty(total_pixels: usize) -> Self {
        Self {
            total_pixels,
            cloudy_pixels: total_pixels,
            ..Default::default()
        }
    }

    /// Fraction of pixels obscured by cloud or otherwise invalid
    pub fn cloud_fraction(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        self.cloudy_pixels as f64 / self.total_pixels as f64
    }

    /// Coefficient of variation over valid pixels, `None` when undefined
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.valid_pixels == 0 || self.mean <= 0.0 {
            return None;
        }
        Some(self.std_dev / self.mean)
    }
}
