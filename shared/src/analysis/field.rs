//! Whole-field vegetation pipeline
//!
//! Per-pixel indices, then the field reduction, then the health classifier.

use serde::{Deserialize, Serialize};

use super::{
    aggregate_field_statistics, assess_health, compute_vegetation_indices_batch, mean, round_to,
};
use crate::models::{FieldIndexStatistics, HealthAssessment, SpectralSample, VegetationIndexSet};
use crate::types::FieldType;

/// Vegetation analysis of one field acquisition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldAnalysis {
    /// Mean of each index over the clear pixels
    pub indices_summary: VegetationIndexSet,
    /// NDVI statistics over all pixels
    pub statistics: FieldIndexStatistics,
    pub health: HealthAssessment,
}

fn summarize(pixels: &[VegetationIndexSet]) -> VegetationIndexSet {
    let avg = |f: fn(&VegetationIndexSet) -> f64| {
        let values: Vec<f64> = pixels.iter().map(f).collect();
        round_to(mean(&values), 4)
    };
    VegetationIndexSet {
        ndvi: avg(|i| i.ndvi),
        savi: avg(|i| i.savi),
        evi: avg(|i| i.evi),
        ndwi: avg(|i| i.ndwi),
        ndmi: avg(|i| i.ndmi),
        gndvi: avg(|i| i.gndvi),
        lai: avg(|i| i.lai),
        fvc: avg(|i| i.fvc),
    }
}

/// Analyse every pixel of a field acquisition
///
/// `cloud_mask[i] == true` marks pixel `i` as cloud covered; a missing or
/// short mask leaves the remaining pixels clear. Cloudy pixels are excluded
/// from the index summary and counted as cloudy in the statistics.
pub fn analyze_field(
    samples: &[SpectralSample],
    cloud_mask: Option<&[bool]>,
    field_type: Option<FieldType>,
) -> FieldAnalysis {
    let pixels = compute_vegetation_indices_batch(samples);
    let is_cloudy = |i: usize| {
        cloud_mask
            .and_then(|mask| mask.get(i).copied())
            .unwrap_or(false)
    };

    let ndvi_values: Vec<f64> = pixels
        .iter()
        .enumerate()
        .map(|(i, p)| if is_cloudy(i) { f64::NAN } else { p.ndvi })
        .collect();
    let statistics = aggregate_field_statistics(&ndvi_values);

    let clear: Vec<VegetationIndexSet> = pixels
        .iter()
        .enumerate()
        .filter(|(i, _)| !is_cloudy(*i))
        .map(|(_, p)| *p)
        .collect();
    let indices_summary = summarize(&clear);
    let health = assess_health(&indices_summary, Some(&statistics), field_type);

    FieldAnalysis {
        indices_summary,
        statistics,
        health,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthCategory;

    #[test]
    fn test_masked_pixels_are_cloudy() {
        let samples = vec![
            SpectralSample::new(0.08, 0.45),
            SpectralSample::new(0.08, 0.45),
            SpectralSample::new(0.3, 0.1),
        ];
        let analysis = analyze_field(&samples, Some(&[false, false, true][..]), None);
        assert_eq!(analysis.statistics.total_pixels, 3);
        assert_eq!(analysis.statistics.valid_pixels, 2);
        assert_eq!(analysis.statistics.cloudy_pixels, 1);
        assert_eq!(analysis.indices_summary.ndvi, 0.6981);
        assert_eq!(analysis.health.overall, HealthCategory::Good);
    }

    #[test]
    fn test_fully_clouded_field() {
        let samples = vec![SpectralSample::new(0.08, 0.45); 4];
        let analysis = analyze_field(&samples, Some(&[true; 4][..]), Some(FieldType::Orchard));
        assert_eq!(analysis.statistics.valid_pixels, 0);
        assert_eq!(analysis.indices_summary, VegetationIndexSet::default());
        assert_eq!(analysis.health.overall, HealthCategory::Critical);
    }

    #[test]
    fn test_no_mask_uses_every_pixel() {
        let samples = vec![SpectralSample::new(0.1, 0.5), SpectralSample::new(0.05, 0.6)];
        let analysis = analyze_field(&samples, None, None);
        assert_eq!(analysis.statistics.valid_pixels, 2);
        assert_eq!(analysis.statistics.cloudy_pixels, 0);
    }
}
