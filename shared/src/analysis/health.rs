//! Crop health classification from vegetation indices

use super::{mean, population_std_dev, round_to};
use crate::models::{
    FieldIndexStatistics, HealthAssessment, HealthCategory, StressFactor, StressLevel,
    VegetationIndexSet,
};
use crate::types::FieldType;

pub const MIN_HEALTH_CONFIDENCE: f64 = 0.5;
pub const MAX_HEALTH_CONFIDENCE: f64 = 0.9;
/// Largest confidence penalty for disagreement between indices
const MAX_DISAGREEMENT_PENALTY: f64 = 0.4;
/// Field CV above which spatial variability is reported
pub const SPATIAL_VARIABILITY_CV: f64 = 0.25;

/// Map NDVI onto the five fixed health breakpoints
pub fn classify_ndvi(ndvi: f64) -> (HealthCategory, StressLevel) {
    if ndvi >= 0.8 {
        (HealthCategory::Excellent, StressLevel::None)
    } else if ndvi >= 0.6 {
        (HealthCategory::Good, StressLevel::Low)
    } else if ndvi >= 0.4 {
        (HealthCategory::Fair, StressLevel::Moderate)
    } else if ndvi >= 0.2 {
        (HealthCategory::Poor, StressLevel::High)
    } else {
        (HealthCategory::Critical, StressLevel::Severe)
    }
}

/// Confidence from agreement between NDVI, SAVI and EVI
///
/// `clamp(0.9 - min(2 * CV, 0.4), 0.5, 0.9)`; a zero mean gets the full penalty.
/// CV is taken against `|mean|`, so water and bare-soil readings are scored too.
pub fn index_agreement_confidence(indices: &VegetationIndexSet) -> f64 {
    let values = [indices.ndvi, indices.savi, indices.evi];
    let mean = mean(&values);
    let penalty = if mean.abs() < f64::EPSILON {
        MAX_DISAGREEMENT_PENALTY
    } else {
        let cv = population_std_dev(&values, mean) / mean.abs();
        (cv * 2.0).min(MAX_DISAGREEMENT_PENALTY)
    };
    round_to(
        (MAX_HEALTH_CONFIDENCE - penalty).clamp(MIN_HEALTH_CONFIDENCE, MAX_HEALTH_CONFIDENCE),
        3,
    )
}

/// Classify the health of a field from its vegetation indices
///
/// Field statistics, when supplied, add a spatial-variability finding. The
/// field type is carried on the assessment only; breakpoints are the same
/// for every crop.
pub fn assess_health(
    indices: &VegetationIndexSet,
    stats: Option<&FieldIndexStatistics>,
    field_type: Option<FieldType>,
) -> HealthAssessment {
    let (overall, stress_level) = classify_ndvi(indices.ndvi);
    let mut stress_factors = Vec::new();
    let mut recommendations = Vec::new();

    if indices.ndvi < 0.3 {
        stress_factors.push(StressFactor::LowVegetationDensity);
        recommendations
            .push("Check irrigation coverage and test soil for nutrient deficiencies".to_string());
    }
    if indices.lai < 1.0 {
        stress_factors.push(StressFactor::InsufficientLeafArea);
        recommendations.push("Consider fertilization to promote leaf development".to_string());
    }
    if indices.savi < 0.8 * indices.ndvi {
        stress_factors.push(StressFactor::SoilBrightness);
        recommendations
            .push("Use SAVI for more accurate readings where soil is exposed".to_string());
    }
    if indices.ndwi < -0.1 {
        stress_factors.push(StressFactor::WaterStress);
        recommendations.push("Monitor irrigation closely for signs of water stress".to_string());
    }

    if let Some(cv) = stats.and_then(FieldIndexStatistics::coefficient_of_variation) {
        if cv > SPATIAL_VARIABILITY_CV {
            stress_factors.push(StressFactor::SpatialVariability);
            recommendations
                .push("High variability detected - investigate field uniformity".to_string());
            recommendations.push("Consider precision management approaches".to_string());
        }
    }

    match overall {
        HealthCategory::Poor | HealthCategory::Critical => {
            recommendations.push("Inspect the field within 24 hours".to_string());
            recommendations.push("Conduct a soil test to identify limiting factors".to_string());
        }
        HealthCategory::Fair => {
            recommendations.push("Monitor the field weekly".to_string());
        }
        HealthCategory::Good | HealthCategory::Excellent => {}
    }

    HealthAssessment {
        overall,
        stress_level,
        stress_factors,
        recommendations,
        confidence: index_agreement_confidence(indices),
        ndvi: indices.ndvi,
        field_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_vegetation_indices;
    use crate::models::SpectralSample;

    fn indices(ndvi: f64) -> VegetationIndexSet {
        VegetationIndexSet {
            ndvi,
            savi: ndvi,
            evi: ndvi,
            ndwi: 0.0,
            ndmi: 0.0,
            gndvi: ndvi,
            lai: 3.0,
            fvc: 0.8,
        }
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(classify_ndvi(0.85), (HealthCategory::Excellent, StressLevel::None));
        assert_eq!(classify_ndvi(0.8), (HealthCategory::Excellent, StressLevel::None));
        assert_eq!(classify_ndvi(0.6), (HealthCategory::Good, StressLevel::Low));
        assert_eq!(classify_ndvi(0.45), (HealthCategory::Fair, StressLevel::Moderate));
        assert_eq!(classify_ndvi(0.2), (HealthCategory::Poor, StressLevel::High));
        assert_eq!(classify_ndvi(0.1), (HealthCategory::Critical, StressLevel::Severe));
    }

    #[test]
    fn test_reflectance_scenario_is_good() {
        let indices = compute_vegetation_indices(&SpectralSample::new(0.08, 0.45));
        assert!((indices.ndvi - 0.698).abs() < 1e-3);
        let assessment = assess_health(&indices, None, None);
        assert_eq!(assessment.overall, HealthCategory::Good);
        assert_eq!(assessment.stress_level, StressLevel::Low);
    }

    #[test]
    fn test_all_factors_reported() {
        let degraded = VegetationIndexSet {
            ndvi: 0.25,
            savi: 0.1,
            evi: 0.25,
            ndwi: -0.3,
            ndmi: -0.3,
            gndvi: 0.25,
            lai: 0.5,
            fvc: 0.2,
        };
        let assessment = assess_health(&degraded, None, Some(FieldType::Pasture));
        assert_eq!(
            assessment.stress_factors,
            vec![
                StressFactor::LowVegetationDensity,
                StressFactor::InsufficientLeafArea,
                StressFactor::SoilBrightness,
                StressFactor::WaterStress,
            ]
        );
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("within 24 hours")));
        assert_eq!(assessment.field_type, Some(FieldType::Pasture));
    }

    #[test]
    fn test_fair_gets_weekly_monitoring() {
        let assessment = assess_health(&indices(0.5), None, None);
        assert_eq!(assessment.overall, HealthCategory::Fair);
        assert!(assessment.recommendations.iter().any(|r| r.contains("weekly")));
        assert!(assessment.stress_factors.is_empty());
    }

    #[test]
    fn test_agreeing_indices_have_max_confidence() {
        assert_eq!(index_agreement_confidence(&indices(0.7)), MAX_HEALTH_CONFIDENCE);
    }

    #[test]
    fn test_disagreeing_indices_floor_at_min() {
        let mut spread = indices(0.7);
        spread.savi = 0.05;
        spread.evi = -0.6;
        assert_eq!(index_agreement_confidence(&spread), MIN_HEALTH_CONFIDENCE);
    }

    #[test]
    fn test_negative_indices_use_absolute_mean() {
        assert_eq!(index_agreement_confidence(&indices(-0.5)), MAX_HEALTH_CONFIDENCE);
        let mut water = indices(-0.5);
        water.savi = -0.1;
        water.evi = -0.9;
        assert_eq!(index_agreement_confidence(&water), MIN_HEALTH_CONFIDENCE);
    }

    #[test]
    fn test_spatial_variability_from_stats() {
        let stats = FieldIndexStatistics {
            mean: 0.5,
            std_dev: 0.2,
            valid_pixels: 100,
            total_pixels: 100,
            ..Default::default()
        };
        let assessment = assess_health(&indices(0.7), Some(&stats), None);
        assert!(assessment.has_factor(StressFactor::SpatialVariability));
    }
}
