//! Crop health classification models

use serde::{Deserialize, Serialize};

use crate::types::FieldType;

/// Overall vegetation health, ordered from worst to best
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl std::fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthCategory::Critical => write!(f, "critical"),
            HealthCategory::Poor => write!(f, "poor"),
            HealthCategory::Fair => write!(f, "fair"),
            HealthCategory::Good => write!(f, "good"),
            HealthCategory::Excellent => write!(f, "excellent"),
        }
    }
}

/// Crop stress level, ordered from none to severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    None,
    Low,
    Moderate,
    High,
    Severe,
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressLevel::None => write!(f, "none"),
            StressLevel::Low => write!(f, "low"),
            StressLevel::Moderate => write!(f, "moderate"),
            StressLevel::High => write!(f, "high"),
            StressLevel::Severe => write!(f, "severe"),
        }
    }
}

/// Qualitative finding raised by the health classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StressFactor {
    LowVegetationDensity,
    InsufficientLeafArea,
    SoilBrightness,
    WaterStress,
    SpatialVariability,
}

impl StressFactor {
    pub fn label(&self) -> &'static str {
        match self {
            StressFactor::LowVegetationDensity => "low vegetation density",
            StressFactor::InsufficientLeafArea => "insufficient leaf area",
            StressFactor::SoilBrightness => "soil brightness affecting readings",
            StressFactor::WaterStress => "potential water stress",
            StressFactor::SpatialVariability => "high spatial variability",
        }
    }
}

impl std::fmt::Display for StressFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Health classification of one field at one point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthAssessment {
    pub overall: HealthCategory,
    pub stress_level: StressLevel,
    pub stress_factors: Vec<StressFactor>,
    pub recommendations: Vec<String>,
    /// Agreement between NDVI, SAVI and EVI, [0.5, 0.9]
    pub confidence: f64,
    /// NDVI the classification was derived from
    pub ndvi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
}

impl HealthAssessment {
    pub fn has_factor(&self, factor: StressFactor) -> bool {
        self.stress_factors.contains(&factor)
    }

    /// Whether the field warrants an on-site inspection
    pub fn needs_inspection(&self) -> bool {
        self.overall <= HealthCategory::Poor
    }
}
