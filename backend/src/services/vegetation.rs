//! Vegetation index, field statistics and crop health service

use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    aggregate_field_statistics, analyze_field, assess_health, compute_vegetation_indices,
    compute_vegetation_indices_batch, validate_cloud_mask, validate_spectral_sample, FieldAnalysis,
    FieldIndexStatistics, FieldType, HealthAssessment, SpectralSample, VegetationIndexSet,
};

/// Vegetation analysis service
#[derive(Clone)]
pub struct VegetationService {
    max_pixels: usize,
}

/// Input for computing indices over many samples
#[derive(Debug, Deserialize, Validate)]
pub struct BatchIndicesInput {
    #[validate(length(min = 1, message = "At least one sample is required"))]
    pub samples: Vec<SpectralSample>,
}

/// Input for aggregating per-pixel index values; `null` marks a no-data pixel
#[derive(Debug, Deserialize)]
pub struct FieldStatisticsInput {
    pub values: Vec<Option<f64>>,
}

/// Input for classifying crop health
#[derive(Debug, Deserialize)]
pub struct AssessHealthInput {
    pub indices: VegetationIndexSet,
    pub statistics: Option<FieldIndexStatistics>,
    pub field_type: Option<FieldType>,
}

/// Input for a whole-field acquisition
#[derive(Debug, Deserialize, Validate)]
pub struct FieldAnalysisInput {
    #[validate(length(min = 1, message = "At least one sample is required"))]
    pub samples: Vec<SpectralSample>,
    /// `true` marks a cloud-covered pixel
    pub cloud_mask: Option<Vec<bool>>,
    pub field_type: Option<FieldType>,
}

impl VegetationService {
    pub fn new(max_pixels: usize) -> Self {
        Self { max_pixels }
    }

    fn check_pixel_limit(&self, count: usize) -> AppResult<()> {
        if count > self.max_pixels {
            return Err(AppError::PayloadTooLarge {
                limit: self.max_pixels,
                actual: count,
            });
        }
        Ok(())
    }

    fn check_samples(samples: &[SpectralSample]) -> AppResult<()> {
        for (i, sample) in samples.iter().enumerate() {
            validate_spectral_sample(sample).map_err(|msg| AppError::Validation {
                field: format!("samples[{}]", i),
                message: msg.to_string(),
            })?;
        }
        Ok(())
    }

    /// Compute every index for a single sample
    pub fn compute_indices(&self, sample: SpectralSample) -> AppResult<VegetationIndexSet> {
        validate_spectral_sample(&sample).map_err(|msg| AppError::Validation {
            field: "sample".to_string(),
            message: msg.to_string(),
        })?;
        Ok(compute_vegetation_indices(&sample))
    }

    /// Compute indices for a batch, in input order
    pub fn compute_batch(&self, input: BatchIndicesInput) -> AppResult<Vec<VegetationIndexSet>> {
        input.validate()?;
        self.check_pixel_limit(input.samples.len())?;
        Self::check_samples(&input.samples)?;

        tracing::debug!("Computing indices for {} samples", input.samples.len());
        Ok(compute_vegetation_indices_batch(&input.samples))
    }

    /// Aggregate per-pixel values into field statistics
    pub fn field_statistics(&self, input: FieldStatisticsInput) -> AppResult<FieldIndexStatistics> {
        self.check_pixel_limit(input.values.len())?;
        let values: Vec<f64> = input
            .values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(aggregate_field_statistics(&values))
    }

    /// Classify crop health from indices and optional field statistics
    pub fn assess_health(&self, input: AssessHealthInput) -> HealthAssessment {
        assess_health(&input.indices, input.statistics.as_ref(), input.field_type)
    }

    /// Run the full pipeline over a field acquisition
    pub fn analyze_field(&self, input: FieldAnalysisInput) -> AppResult<FieldAnalysis> {
        input.validate()?;
        self.check_pixel_limit(input.samples.len())?;
        Self::check_samples(&input.samples)?;
        if let Some(mask) = &input.cloud_mask {
            validate_cloud_mask(mask, input.samples.len()).map_err(|msg| AppError::Validation {
                field: "cloud_mask".to_string(),
                message: msg.to_string(),
            })?;
        }

        let analysis = analyze_field(
            &input.samples,
            input.cloud_mask.as_deref(),
            input.field_type,
        );
        tracing::info!(
            valid_pixels = analysis.statistics.valid_pixels,
            cloud_fraction = analysis.statistics.cloud_fraction(),
            health = %analysis.health.overall,
            "Field analysis complete"
        );
        Ok(analysis)
    }
}
