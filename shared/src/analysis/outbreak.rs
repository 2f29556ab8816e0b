//! Outbreak probability engine and field-level prediction
//!
//! Probabilities are composed multiplicatively from a fixed base and then
//! clamped, so the engine never reports certainty or impossibility.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::{
    classify_risk_level, contribution_of, estimate_confidence, overall_risk_level, round_to,
    score_environment, summarize_forecast,
};
use crate::catalog::ThreatCatalog;
use crate::error::AnalysisResult;
use crate::maybe_rayon::*;
use crate::models::{
    CropStageInfo, CropStageRisk, CropType, EnvironmentalFactor, EnvironmentalRiskFactor,
    GrowthStage, OutbreakPrediction, ThreatDefinition, ThreatPrediction, ThreatType,
    WeatherForecast,
};

pub const BASE_OUTBREAK_PROBABILITY: f64 = 0.3;
pub const MIN_OUTBREAK_PROBABILITY: f64 = 0.05;
pub const MAX_OUTBREAK_PROBABILITY: f64 = 0.95;
/// Threats below this probability are left out of the ranked list
pub const DEFAULT_REPORTING_THRESHOLD: f64 = 0.4;

const MOISTURE_WEIGHT: f64 = 0.4;
const TEMPERATURE_WEIGHT: f64 = 0.3;
/// 3-day rainfall (mm) above which fungal spores get a wet-spell boost
const WET_SPELL_MM: f64 = 15.0;
const WET_SPELL_MULTIPLIER: f64 = 1.3;
/// Months (inclusive) of the fixed northern-hemisphere rust season
const RUST_SEASON: std::ops::RangeInclusive<u32> = 6..=9;
const RUST_SEASON_MULTIPLIER: f64 = 1.2;

/// Conditions a single threat is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct OutbreakContext<'a> {
    pub factors: &'a [EnvironmentalRiskFactor],
    pub stage: GrowthStage,
    pub precipitation_3d_mm: f64,
    /// Calendar month, 1 to 12
    pub month: u32,
}

/// Outbreak probability of one threat, in [0.05, 0.95]
pub fn outbreak_probability(threat: &ThreatDefinition, ctx: &OutbreakContext<'_>) -> f64 {
    let mut probability = BASE_OUTBREAK_PROBABILITY;

    if threat.is_vulnerable_at(ctx.stage) {
        probability *= 1.0 + threat.stage_vulnerability;
    }

    if threat.threat_type.is_moisture_driven() {
        let humidity = contribution_of(ctx.factors, EnvironmentalFactor::Humidity);
        let precipitation = contribution_of(ctx.factors, EnvironmentalFactor::Precipitation);
        probability *= 1.0 + MOISTURE_WEIGHT * humidity.max(precipitation);
    } else if threat.threat_type == ThreatType::Insect {
        let temperature = contribution_of(ctx.factors, EnvironmentalFactor::Temperature);
        probability *= 1.0 + TEMPERATURE_WEIGHT * temperature;
    }

    if threat.threat_type == ThreatType::Fungal && ctx.precipitation_3d_mm > WET_SPELL_MM {
        probability *= WET_SPELL_MULTIPLIER;
    }

    if threat.is_rust() && RUST_SEASON.contains(&ctx.month) {
        probability *= RUST_SEASON_MULTIPLIER;
    }

    probability.clamp(MIN_OUTBREAK_PROBABILITY, MAX_OUTBREAK_PROBABILITY)
}

/// Score one threat into a prediction record
pub fn evaluate_threat(threat: &ThreatDefinition, ctx: &OutbreakContext<'_>) -> ThreatPrediction {
    let probability = round_to(outbreak_probability(threat, ctx), 4);
    ThreatPrediction {
        threat_id: threat.id.clone(),
        name: threat.name.clone(),
        threat_type: threat.threat_type,
        severity: threat.severity,
        probability,
        risk_level: classify_risk_level(probability, threat.severity),
        stage_vulnerable: threat.is_vulnerable_at(ctx.stage),
        treatment_options: threat.treatment_options.clone(),
        preventive_measures: threat.preventive_measures.clone(),
    }
}

/// Caller-supplied settings for [`predict_outbreaks`]
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOptions {
    pub prediction_date: NaiveDate,
    /// Regional outbreak pressure from surveillance data, reported as-is
    pub regional_pressure: Option<f64>,
    pub reporting_threshold: f64,
}

impl PredictionOptions {
    pub fn new(prediction_date: NaiveDate) -> Self {
        Self {
            prediction_date,
            regional_pressure: None,
            reporting_threshold: DEFAULT_REPORTING_THRESHOLD,
        }
    }

    pub fn with_regional_pressure(mut self, pressure: f64) -> Self {
        self.regional_pressure = Some(pressure);
        self
    }

    pub fn with_reporting_threshold(mut self, threshold: f64) -> Self {
        self.reporting_threshold = threshold;
        self
    }
}

fn stage_risk(threats: &[ThreatDefinition], stage: &CropStageInfo) -> CropStageRisk {
    let vulnerable_at = |s: GrowthStage| -> Vec<String> {
        threats
            .iter()
            .filter(|t| t.is_vulnerable_at(s))
            .map(|t| t.id.clone())
            .collect()
    };

    CropStageRisk {
        current_stage: stage.current,
        next_stage: stage.next,
        vulnerable_threats: vulnerable_at(stage.current),
        upcoming_vulnerable_threats: stage.next.map(vulnerable_at).unwrap_or_default(),
    }
}

/// Predict pest and disease outbreaks for one field
///
/// Fails with `UnsupportedCropType` when the catalog has no entry for the
/// crop; no threats are ever invented for an unknown crop.
pub fn predict_outbreaks(
    field_id: Uuid,
    crop_type: &CropType,
    forecast: &WeatherForecast,
    crop_stage: &CropStageInfo,
    catalog: &ThreatCatalog,
    options: &PredictionOptions,
) -> AnalysisResult<OutbreakPrediction> {
    let catalog_threats = catalog.threats_for(crop_type)?;

    let environmental_factors = score_environment(forecast);
    let summary = summarize_forecast(forecast);
    let ctx = OutbreakContext {
        factors: &environmental_factors,
        stage: crop_stage.current,
        precipitation_3d_mm: summary.precipitation_3d,
        month: options.prediction_date.month(),
    };

    let evaluated: Vec<(f64, ThreatPrediction)> = catalog_threats
        .into_par_iter()
        .map(|threat| (threat.baseline_risk, evaluate_threat(threat, &ctx)))
        .collect();

    let mut qualifying: Vec<(f64, ThreatPrediction)> = evaluated
        .into_iter()
        .filter(|(_, p)| p.probability >= options.reporting_threshold)
        .collect();
    qualifying.sort_by(|(a_base, a), (b_base, b)| {
        b.probability
            .total_cmp(&a.probability)
            .then(b_base.total_cmp(a_base))
            .then_with(|| a.threat_id.cmp(&b.threat_id))
    });
    let threats: Vec<ThreatPrediction> = qualifying.into_iter().map(|(_, p)| p).collect();

    let confidence = estimate_confidence(&environmental_factors, forecast.confidence, threats.len());
    let regional_threat_level = options
        .regional_pressure
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0))
        .unwrap_or(0.0);

    Ok(OutbreakPrediction {
        field_id,
        crop_type: crop_type.clone(),
        prediction_date: options.prediction_date,
        overall_risk_level: overall_risk_level(&threats),
        crop_stage_risk: stage_risk(catalog_threats, crop_stage),
        threats,
        environmental_factors,
        regional_threat_level,
        confidence,
    })
}
