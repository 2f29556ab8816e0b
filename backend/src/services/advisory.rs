//! Stress trend and irrigation advisory service

use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    analyze_stress_trend, plan_irrigation, validate_forecast, validate_ndvi_observation,
    validate_soil_profile, DailyForecast, IrrigationPlan, NdviObservation, SoilWaterProfile,
    StressTrendAnalysis, WeatherForecast,
};

/// Input for analysing an NDVI history
#[derive(Debug, Deserialize, Validate)]
pub struct StressTrendInput {
    #[validate(length(max = 1000, message = "At most 1000 observations per request"))]
    pub observations: Vec<NdviObservation>,
}

/// Input for irrigation planning
#[derive(Debug, Deserialize)]
pub struct IrrigationInput {
    #[serde(flatten)]
    pub profile: SoilWaterProfile,
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

/// Field advisory service
#[derive(Clone, Default)]
pub struct AdvisoryService;

impl AdvisoryService {
    pub fn new() -> Self {
        Self
    }

    /// Analyse stress trend from an NDVI series
    pub fn stress_trend(&self, input: StressTrendInput) -> AppResult<StressTrendAnalysis> {
        input.validate()?;
        for (i, observation) in input.observations.iter().enumerate() {
            validate_ndvi_observation(observation).map_err(|msg| AppError::Validation {
                field: format!("observations[{}]", i),
                message: msg.to_string(),
            })?;
        }
        Ok(analyze_stress_trend(&input.observations)?)
    }

    /// Plan irrigation from soil water state and an optional forecast
    pub fn irrigation(&self, input: IrrigationInput) -> AppResult<IrrigationPlan> {
        validate_soil_profile(&input.profile).map_err(|msg| AppError::Validation {
            field: "profile".to_string(),
            message: msg.to_string(),
        })?;

        let forecast = if input.forecast.is_empty() {
            None
        } else {
            let forecast = WeatherForecast::new(input.forecast, 1.0);
            validate_forecast(&forecast).map_err(|msg| AppError::Validation {
                field: "forecast".to_string(),
                message: msg.to_string(),
            })?;
            Some(forecast)
        };

        let plan = plan_irrigation(&input.profile, forecast.as_ref());
        tracing::debug!(
            urgency = ?plan.urgency,
            amount_mm = plan.recommended_amount_mm,
            "Irrigation plan computed"
        );
        Ok(plan)
    }
}
