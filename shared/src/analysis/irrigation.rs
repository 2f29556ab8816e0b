//! Water-balance irrigation scheduling

use super::{mean, round_to};
use crate::models::{
    DailyForecast, GrowthStage, IrrigationPlan, IrrigationTiming, IrrigationUrgency,
    IrrigationWeatherFactors, SoilWaterProfile, WeatherForecast,
};

const FORECAST_DAYS: usize = 7;
const DEFAULT_TEMPERATURE: f64 = 25.0;
const DEFAULT_HUMIDITY: f64 = 60.0;

/// Relative water demand of a growth stage
pub fn stage_water_requirement(stage: GrowthStage) -> f64 {
    match stage {
        GrowthStage::Germination => 0.3,
        GrowthStage::Emergence => 0.4,
        GrowthStage::VegetativeEarly | GrowthStage::VegetativeLate => 0.6,
        GrowthStage::Flowering => 0.8,
        GrowthStage::Fruiting | GrowthStage::GrainFill => 0.7,
        GrowthStage::Maturity => 0.4,
    }
}

/// Share of plant-available water left in the root zone
pub fn water_stress_level(profile: &SoilWaterProfile) -> f64 {
    let available = (profile.soil_moisture - profile.wilting_point).max(0.0);
    let max_available = profile.field_capacity - profile.wilting_point;
    if max_available > 0.0 {
        available / max_available
    } else {
        0.0
    }
}

/// Evapotranspiration scaling from temperature and humidity
pub fn evapotranspiration_factor(avg_temperature: f64, avg_humidity: f64) -> f64 {
    let mut factor = 1.0;
    if avg_temperature > 30.0 {
        factor += 0.2;
    } else if avg_temperature < 15.0 {
        factor -= 0.2;
    }
    if avg_humidity > 80.0 {
        factor -= 0.1;
    } else if avg_humidity < 40.0 {
        factor += 0.1;
    }
    factor
}

/// Plan irrigation for a field from its soil water state and the coming week
pub fn plan_irrigation(
    profile: &SoilWaterProfile,
    forecast: Option<&WeatherForecast>,
) -> IrrigationPlan {
    let days = forecast
        .map(|f| f.window(FORECAST_DAYS))
        .filter(|days| !days.is_empty());
    let (rainfall, avg_temperature, avg_humidity) = match days {
        Some(days) => {
            let temperatures: Vec<f64> = days.iter().map(DailyForecast::mean_temperature).collect();
            let humidity: Vec<f64> = days.iter().map(|d| d.humidity_percent).collect();
            (
                days.iter().map(|d| d.precipitation_mm).sum::<f64>(),
                mean(&temperatures),
                mean(&humidity),
            )
        }
        None => (0.0, DEFAULT_TEMPERATURE, DEFAULT_HUMIDITY),
    };

    let stress = water_stress_level(profile);
    let base_requirement = stage_water_requirement(profile.crop_stage);
    let et_factor = evapotranspiration_factor(avg_temperature, avg_humidity);
    let adjusted_requirement = base_requirement * et_factor;
    let deficit = profile.field_capacity - profile.soil_moisture;

    let (mut urgency, mut amount, mut timing) = if stress < 0.3 {
        (IrrigationUrgency::Critical, deficit * 1000.0, IrrigationTiming::Immediate)
    } else if stress < 0.5 {
        (IrrigationUrgency::High, deficit * 800.0, IrrigationTiming::Within24Hours)
    } else if stress < 0.7 {
        (
            IrrigationUrgency::Moderate,
            adjusted_requirement * 600.0,
            IrrigationTiming::Within3Days,
        )
    } else {
        (IrrigationUrgency::Low, 0.0, IrrigationTiming::Monitor)
    };

    if rainfall > amount * 0.8 {
        amount = 0.0;
        timing = IrrigationTiming::DelayForRain;
        urgency = IrrigationUrgency::Low;
    } else if rainfall > 0.0 {
        amount = (amount - rainfall).max(0.0);
    }

    let mut efficiency_tips = Vec::new();
    if urgency >= IrrigationUrgency::High {
        efficiency_tips
            .push("Apply during early morning or evening to reduce evaporation".to_string());
    }
    if avg_temperature > 30.0 {
        efficiency_tips.push("Consider mulching to retain soil moisture".to_string());
    }
    if rainfall > 10.0 {
        efficiency_tips.push("Delay irrigation until after expected rainfall".to_string());
    }

    IrrigationPlan {
        irrigation_needed: amount > 0.0,
        recommended_amount_mm: round_to(amount, 1),
        urgency,
        timing,
        water_stress_level: round_to(stress, 2),
        available_water_percent: round_to(stress * 100.0, 1),
        crop_stage: profile.crop_stage,
        weather_factors: IrrigationWeatherFactors {
            expected_rainfall_7d: round_to(rainfall, 1),
            avg_temperature: round_to(avg_temperature, 1),
            avg_humidity: round_to(avg_humidity, 1),
            evapotranspiration_factor: round_to(et_factor, 2),
        },
        base_requirement,
        adjusted_requirement: round_to(adjusted_requirement, 2),
        efficiency_tips,
    }
}
