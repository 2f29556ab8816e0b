//! WebAssembly module for the AgriSense platform
//!
//! Provides client-side computation for:
//! - Vegetation indices from reflectance
//! - Field statistics and crop health classification
//! - Outbreak risk against the built-in threat catalog
//! - Offline stress trend and irrigation advice
//!
//! Structured inputs and outputs cross the boundary as JSON strings.

use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{AnalysisError, PredictionOptions, ThreatCatalog};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"AgriSense analysis module loaded".into());
}

fn catalog() -> Result<&'static ThreatCatalog, String> {
    static CATALOG: OnceLock<Result<ThreatCatalog, AnalysisError>> = OnceLock::new();
    CATALOG
        .get_or_init(ThreatCatalog::builtin)
        .as_ref()
        .map_err(|e| e.to_string())
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

/// Surface an error to the browser console and to the caller
fn js_error(message: String) -> JsValue {
    web_sys::console::error_1(&message.as_str().into());
    JsValue::from_str(&message)
}

// ============================================================================
// Vegetation
// ============================================================================

/// Single-pixel NDVI
#[wasm_bindgen]
pub fn compute_ndvi(red: f64, nir: f64) -> f64 {
    shared::ndvi(red, nir)
}

fn indices_json(sample_json: &str) -> Result<String, String> {
    let sample: SpectralSample = parse(sample_json, "sample")?;
    validate_spectral_sample(&sample)?;
    to_json(&shared::compute_vegetation_indices(&sample))
}

/// Compute every vegetation index for one reflectance sample
#[wasm_bindgen]
pub fn compute_indices(sample_json: &str) -> Result<String, JsValue> {
    indices_json(sample_json).map_err(js_error)
}

fn check_samples(samples: &[SpectralSample]) -> Result<(), String> {
    for (i, sample) in samples.iter().enumerate() {
        validate_spectral_sample(sample).map_err(|msg| format!("samples[{}]: {}", i, msg))?;
    }
    Ok(())
}

fn batch_json(samples_json: &str) -> Result<String, String> {
    let samples: Vec<SpectralSample> = parse(samples_json, "samples")?;
    check_samples(&samples)?;
    to_json(&shared::compute_vegetation_indices_batch(&samples))
}

/// Compute indices for an array of samples, preserving order
#[wasm_bindgen]
pub fn compute_indices_batch(samples_json: &str) -> Result<String, JsValue> {
    batch_json(samples_json).map_err(js_error)
}

fn statistics_json(values_json: &str) -> Result<String, String> {
    let values: Vec<Option<f64>> = parse(values_json, "values")?;
    let values: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
    to_json(&shared::aggregate_field_statistics(&values))
}

/// Aggregate per-pixel index values; `null` entries count as cloudy
#[wasm_bindgen]
pub fn field_statistics(values_json: &str) -> Result<String, JsValue> {
    statistics_json(values_json).map_err(js_error)
}

#[derive(Deserialize)]
struct HealthRequest {
    indices: VegetationIndexSet,
    statistics: Option<FieldIndexStatistics>,
    field_type: Option<FieldType>,
}

fn health_json(request_json: &str) -> Result<String, String> {
    let request: HealthRequest = parse(request_json, "health request")?;
    let assessment = shared::assess_health(
        &request.indices,
        request.statistics.as_ref(),
        request.field_type,
    );
    to_json(&assessment)
}

/// Classify crop health from `{indices, statistics?, field_type?}`
#[wasm_bindgen]
pub fn assess_health(request_json: &str) -> Result<String, JsValue> {
    health_json(request_json).map_err(js_error)
}

#[derive(Deserialize)]
struct FieldRequest {
    samples: Vec<SpectralSample>,
    cloud_mask: Option<Vec<bool>>,
    field_type: Option<FieldType>,
}

fn field_json(request_json: &str) -> Result<String, String> {
    let request: FieldRequest = parse(request_json, "field request")?;
    check_samples(&request.samples)?;
    if let Some(mask) = &request.cloud_mask {
        validate_cloud_mask(mask, request.samples.len())?;
    }
    let analysis = shared::analyze_field(
        &request.samples,
        request.cloud_mask.as_deref(),
        request.field_type,
    );
    to_json(&analysis)
}

/// Indices, statistics and health for a whole acquisition
#[wasm_bindgen]
pub fn analyze_field(request_json: &str) -> Result<String, JsValue> {
    field_json(request_json).map_err(js_error)
}

// ============================================================================
// Outbreak Risk
// ============================================================================

#[derive(Deserialize)]
struct OutbreakRequest {
    field_id: Option<Uuid>,
    crop_type: String,
    crop_stage: GrowthStage,
    next_stage: Option<GrowthStage>,
    forecast: Vec<DailyForecast>,
    #[serde(default = "default_forecast_confidence")]
    forecast_confidence: f64,
    prediction_date: NaiveDate,
    regional_pressure: Option<f64>,
}

fn default_forecast_confidence() -> f64 {
    0.8
}

fn outbreak_json(request_json: &str) -> Result<String, String> {
    let request: OutbreakRequest = parse(request_json, "outbreak request")?;
    validate_crop_type_name(&request.crop_type)?;
    let forecast = WeatherForecast::new(request.forecast, request.forecast_confidence);
    validate_forecast(&forecast)?;

    let mut stage = CropStageInfo::new(request.crop_stage);
    if let Some(next) = request.next_stage {
        stage = stage.with_next(next);
    }
    let mut options = PredictionOptions::new(request.prediction_date);
    if let Some(pressure) = request.regional_pressure {
        options = options.with_regional_pressure(pressure);
    }

    let prediction = shared::predict_outbreaks(
        request.field_id.unwrap_or_else(Uuid::nil),
        &CropType::from(request.crop_type.as_str()),
        &forecast,
        &stage,
        catalog()?,
        &options,
    )
    .map_err(|e| e.to_string())?;
    to_json(&prediction)
}

/// Predict outbreaks for one field against the built-in catalog
///
/// The prediction date is required since the module has no trusted clock.
#[wasm_bindgen]
pub fn predict_outbreaks(request_json: &str) -> Result<String, JsValue> {
    outbreak_json(request_json).map_err(js_error)
}

fn severity_from_name(name: &str) -> Option<ImpactSeverity> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase())).ok()
}

/// Classify a raw probability for a threat of the named severity
#[wasm_bindgen]
pub fn classify_risk(probability: f64, severity: &str) -> String {
    let severity = severity_from_name(severity).unwrap_or(ImpactSeverity::Moderate);
    shared::classify_risk_level(probability, severity).to_string()
}

/// Crop names the built-in catalog covers, as a JSON array
#[wasm_bindgen]
pub fn supported_crops() -> Result<String, JsValue> {
    catalog()
        .and_then(|c| {
            let names: Vec<String> = c.crop_types().into_iter().map(String::from).collect();
            to_json(&names)
        })
        .map_err(js_error)
}

// ============================================================================
// Advisory
// ============================================================================

fn stress_trend_json(observations_json: &str) -> Result<String, String> {
    let observations: Vec<NdviObservation> = parse(observations_json, "observations")?;
    for (i, observation) in observations.iter().enumerate() {
        validate_ndvi_observation(observation)
            .map_err(|msg| format!("observations[{}]: {}", i, msg))?;
    }
    let analysis = shared::analyze_stress_trend(&observations).map_err(|e| e.to_string())?;
    to_json(&analysis)
}

/// Stress, trend and anomalies from an NDVI history
#[wasm_bindgen]
pub fn stress_trend(observations_json: &str) -> Result<String, JsValue> {
    stress_trend_json(observations_json).map_err(js_error)
}

#[derive(Deserialize)]
struct IrrigationRequest {
    #[serde(flatten)]
    profile: SoilWaterProfile,
    #[serde(default)]
    forecast: Vec<DailyForecast>,
}

fn irrigation_json(request_json: &str) -> Result<String, String> {
    let request: IrrigationRequest = parse(request_json, "irrigation request")?;
    validate_soil_profile(&request.profile)?;
    let forecast =
        (!request.forecast.is_empty()).then(|| WeatherForecast::new(request.forecast, 1.0));
    if let Some(forecast) = &forecast {
        validate_forecast(forecast)?;
    }
    to_json(&shared::plan_irrigation(&request.profile, forecast.as_ref()))
}

/// Irrigation plan from soil water state and an optional forecast
#[wasm_bindgen]
pub fn plan_irrigation(request_json: &str) -> Result<String, JsValue> {
    irrigation_json(request_json).map_err(js_error)
}
