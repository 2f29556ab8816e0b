//! NDVI time-series stress trend models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::StressLevel;
use crate::types::DateRange;

/// A dated NDVI observation for a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NdviObservation {
    pub date: NaiveDate,
    pub ndvi: f64,
}

/// Direction of the NDVI series over time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NdviTrend {
    Improving,
    Stable,
    Declining,
}

/// Magnitude of the fitted slope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignificance {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Low,
    High,
}

/// Observation more than two standard deviations from the series mean
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdviAnomaly {
    pub date: NaiveDate,
    pub ndvi: f64,
    pub deviation: f64,
    pub kind: AnomalyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub coefficient_of_variation: f64,
}

/// Result of analysing an NDVI series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressTrendAnalysis {
    pub stress_level: StressLevel,
    pub confidence: f64,
    pub statistics: TrendStatistics,
    pub direction: NdviTrend,
    pub slope: f64,
    pub significance: TrendSignificance,
    pub anomalies: Vec<NdviAnomaly>,
    pub recommendations: Vec<String>,
    pub observations: usize,
    pub date_range: DateRange,
}
