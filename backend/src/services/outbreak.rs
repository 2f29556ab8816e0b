//! Pest and disease outbreak prediction service

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};
use shared::{
    predict_outbreaks, validate_crop_type_name, validate_forecast, CropStageInfo, CropType,
    DailyForecast, GrowthStage, OutbreakPrediction, PredictionOptions, ThreatCatalog,
    WeatherForecast,
};

/// Outbreak prediction service
#[derive(Clone)]
pub struct OutbreakService {
    catalog: Arc<ThreatCatalog>,
    settings: AnalysisConfig,
}

/// Input for predicting outbreaks on one field
#[derive(Debug, Deserialize, Validate)]
pub struct PredictOutbreaksInput {
    /// Generated when absent
    pub field_id: Option<Uuid>,

    #[validate(length(min = 1, max = 50, message = "Crop type must be 1-50 characters"))]
    pub crop_type: String,

    pub crop_stage: GrowthStage,

    pub next_stage: Option<GrowthStage>,

    #[validate(length(min = 1, max = 16, message = "Forecast must cover 1-16 days"))]
    pub forecast: Vec<DailyForecast>,

    #[validate(range(min = 0.0, max = 1.0, message = "Forecast confidence must be between 0 and 1"))]
    pub forecast_confidence: Option<f64>,

    /// Defaults to today (UTC)
    pub prediction_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, max = 1.0, message = "Regional pressure must be between 0 and 1"))]
    pub regional_pressure: Option<f64>,
}

impl OutbreakService {
    pub fn new(catalog: Arc<ThreatCatalog>, settings: AnalysisConfig) -> Self {
        Self { catalog, settings }
    }

    /// Predict outbreaks for a field
    pub fn predict(&self, input: PredictOutbreaksInput) -> AppResult<OutbreakPrediction> {
        input.validate()?;
        validate_crop_type_name(&input.crop_type).map_err(|msg| AppError::Validation {
            field: "crop_type".to_string(),
            message: msg.to_string(),
        })?;

        let forecast = WeatherForecast::new(
            input.forecast,
            input
                .forecast_confidence
                .unwrap_or(self.settings.default_forecast_confidence),
        );
        validate_forecast(&forecast).map_err(|msg| AppError::Validation {
            field: "forecast".to_string(),
            message: msg.to_string(),
        })?;

        let crop_type = CropType::from(input.crop_type.as_str());
        let mut stage = CropStageInfo::new(input.crop_stage);
        if let Some(next) = input.next_stage {
            stage = stage.with_next(next);
        }

        let prediction_date = input
            .prediction_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let mut options = PredictionOptions::new(prediction_date)
            .with_reporting_threshold(self.settings.reporting_threshold);
        if let Some(pressure) = input.regional_pressure {
            options = options.with_regional_pressure(pressure);
        }

        let field_id = input.field_id.unwrap_or_else(Uuid::new_v4);
        let prediction = predict_outbreaks(
            field_id,
            &crop_type,
            &forecast,
            &stage,
            &self.catalog,
            &options,
        )?;

        tracing::info!(
            %field_id,
            crop = %crop_type,
            stage = %stage.current,
            threats = prediction.threats.len(),
            overall = %prediction.overall_risk_level,
            top = prediction.highest_risk().map(|t| t.threat_id.as_str()).unwrap_or("none"),
            "Outbreak prediction complete"
        );

        Ok(prediction)
    }
}
