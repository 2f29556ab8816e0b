//! Validation utilities for field observations and advisory inputs
//!
//! The calculators never reject degenerate numbers; these checks are for the
//! request boundary, where obviously corrupt input should be turned away
//! before it is scored.

use crate::models::{
    DailyForecast, NdviObservation, SoilWaterProfile, SpectralSample, WeatherForecast,
};

/// Reflectance above this is treated as a sensor or scaling error
pub const MAX_REFLECTANCE: f64 = 1.5;
/// Minimum forecast length accepted for outbreak prediction
pub const MIN_FORECAST_DAYS: usize = 1;
pub const MAX_FORECAST_DAYS: usize = 16;

// ============================================================================
// Spectral Validations
// ============================================================================

fn validate_band(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Reflectance must be a finite number");
    }
    if !(-0.1..=MAX_REFLECTANCE).contains(&value) {
        return Err("Reflectance must be between -0.1 and 1.5");
    }
    Ok(())
}

/// Validate the bands of one spectral sample
pub fn validate_spectral_sample(sample: &SpectralSample) -> Result<(), &'static str> {
    validate_band(sample.red)?;
    validate_band(sample.nir)?;
    for band in [sample.blue, sample.green, sample.swir1, sample.swir2]
        .into_iter()
        .flatten()
    {
        validate_band(band)?;
    }
    Ok(())
}

/// Validate a cloud mask against the pixels it covers
pub fn validate_cloud_mask(mask: &[bool], pixel_count: usize) -> Result<(), &'static str> {
    if mask.len() != pixel_count {
        return Err("Cloud mask length must match the number of samples");
    }
    Ok(())
}

// ============================================================================
// Weather Validations
// ============================================================================

/// Validate one forecast day
pub fn validate_daily_forecast(day: &DailyForecast) -> Result<(), &'static str> {
    if day.temperature_min_celsius > day.temperature_max_celsius {
        return Err("Minimum temperature cannot exceed maximum temperature");
    }
    if !(-60.0..=60.0).contains(&day.temperature_min_celsius)
        || !(-60.0..=60.0).contains(&day.temperature_max_celsius)
    {
        return Err("Temperature must be between -60 and 60 °C");
    }
    if !(0.0..=100.0).contains(&day.humidity_percent) {
        return Err("Humidity must be between 0 and 100%");
    }
    if !(day.precipitation_mm >= 0.0 && day.precipitation_mm.is_finite()) {
        return Err("Precipitation cannot be negative");
    }
    if !(day.wind_speed_mps >= 0.0 && day.wind_speed_mps.is_finite()) {
        return Err("Wind speed cannot be negative");
    }
    Ok(())
}

/// Validate a forecast as supplied by the forecast service
pub fn validate_forecast(forecast: &WeatherForecast) -> Result<(), &'static str> {
    if forecast.days.len() < MIN_FORECAST_DAYS {
        return Err("Forecast must contain at least one day");
    }
    if forecast.days.len() > MAX_FORECAST_DAYS {
        return Err("Forecast cannot exceed 16 days");
    }
    if !(0.0..=1.0).contains(&forecast.confidence) {
        return Err("Forecast confidence must be between 0 and 1");
    }
    if forecast.days.windows(2).any(|w| w[0].date >= w[1].date) {
        return Err("Forecast days must be in ascending date order");
    }
    forecast.days.iter().try_for_each(validate_daily_forecast)
}

// ============================================================================
// Field Validations
// ============================================================================

/// Validate a soil water profile
pub fn validate_soil_profile(profile: &SoilWaterProfile) -> Result<(), &'static str> {
    for value in [
        profile.soil_moisture,
        profile.field_capacity,
        profile.wilting_point,
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err("Soil water fractions must be between 0 and 1");
        }
    }
    if profile.wilting_point >= profile.field_capacity {
        return Err("Wilting point must be below field capacity");
    }
    Ok(())
}

/// Validate an NDVI observation
pub fn validate_ndvi_observation(observation: &NdviObservation) -> Result<(), &'static str> {
    if !(-1.0..=1.0).contains(&observation.ndvi) {
        return Err("NDVI must be between -1 and 1");
    }
    Ok(())
}

/// Validate a crop type name (letters, spaces, hyphens and underscores)
pub fn validate_crop_type_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Crop type cannot be empty");
    }
    if trimmed.len() > 50 {
        return Err("Crop type must be at most 50 characters");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '_')
    {
        return Err("Crop type may only contain letters, spaces, hyphens and underscores");
    }
    Ok(())
}
