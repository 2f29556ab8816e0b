//! Irrigation planning models

use serde::{Deserialize, Serialize};

use crate::models::GrowthStage;

/// Volumetric soil water state of a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilWaterProfile {
    /// Current volumetric soil moisture, [0, 1]
    #[serde(default = "default_soil_moisture")]
    pub soil_moisture: f64,
    #[serde(default = "default_field_capacity")]
    pub field_capacity: f64,
    #[serde(default = "default_wilting_point")]
    pub wilting_point: f64,
    #[serde(default = "default_stage")]
    pub crop_stage: GrowthStage,
}

fn default_soil_moisture() -> f64 {
    0.3
}

fn default_field_capacity() -> f64 {
    0.4
}

fn default_wilting_point() -> f64 {
    0.15
}

fn default_stage() -> GrowthStage {
    GrowthStage::VegetativeEarly
}

impl Default for SoilWaterProfile {
    fn default() -> Self {
        Self {
            soil_moisture: default_soil_moisture(),
            field_capacity: default_field_capacity(),
            wilting_point: default_wilting_point(),
            crop_stage: default_stage(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationUrgency {
    Low,
    Moderate,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationTiming {
    Immediate,
    #[serde(rename = "within_24h")]
    Within24Hours,
    #[serde(rename = "within_3_days")]
    Within3Days,
    Monitor,
    DelayForRain,
}

/// Weather inputs the plan was computed from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationWeatherFactors {
    pub expected_rainfall_7d: f64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub evapotranspiration_factor: f64,
}

/// Recommended irrigation for a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationPlan {
    pub irrigation_needed: bool,
    pub recommended_amount_mm: f64,
    pub urgency: IrrigationUrgency,
    pub timing: IrrigationTiming,
    /// Fraction of plant-available water remaining, [0, 1]
    pub water_stress_level: f64,
    pub available_water_percent: f64,
    pub crop_stage: GrowthStage,
    pub weather_factors: IrrigationWeatherFactors,
    pub base_requirement: f64,
    pub adjusted_requirement: f64,
    pub efficiency_tips: Vec<String>,
}
