//! Outbreak prediction models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    CropType, EnvironmentalRiskFactor, GrowthStage, ImpactSeverity, RiskLevel, ThreatType,
};

/// Computed outbreak outlook for one catalog threat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreatPrediction {
    pub threat_id: String,
    pub name: String,
    pub threat_type: ThreatType,
    pub severity: ImpactSeverity,
    /// Outbreak probability, [0.05, 0.95]
    pub probability: f64,
    pub risk_level: RiskLevel,
    /// Whether the crop is currently in one of the threat's vulnerable stages
    pub stage_vulnerable: bool,
    pub treatment_options: Vec<String>,
    pub preventive_measures: Vec<String>,
}

/// Which threats the current and upcoming growth stages expose the crop to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropStageRisk {
    pub current_stage: GrowthStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<GrowthStage>,
    pub vulnerable_threats: Vec<String>,
    pub upcoming_vulnerable_threats: Vec<String>,
}

/// Outbreak outlook for one field, crop and date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutbreakPrediction {
    pub field_id: Uuid,
    pub crop_type: CropType,
    pub prediction_date: NaiveDate,
    /// Qualifying threats, most likely first
    pub threats: Vec<ThreatPrediction>,
    pub overall_risk_level: RiskLevel,
    pub environmental_factors: Vec<EnvironmentalRiskFactor>,
    pub crop_stage_risk: CropStageRisk,
    /// Caller-supplied regional outbreak pressure, [0, 1]
    pub regional_threat_level: f64,
    /// Confidence in the prediction, [0.6, 0.95]
    pub confidence: f64,
}

impl OutbreakPrediction {
    pub fn highest_risk(&self) -> Option<&ThreatPrediction> {
        self.threats.first()
    }

    pub fn threats_at_or_above(&self, level: RiskLevel) -> impl Iterator<Item = &ThreatPrediction> {
        self.threats.iter().filter(move |t| t.risk_level >= level)
    }
}
