//! Environmental risk factor and risk level models

use serde::{Deserialize, Serialize};

/// Weather observable scored by the environmental risk scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalFactor {
    Temperature,
    Humidity,
    Precipitation,
    WindSpeed,
}

impl EnvironmentalFactor {
    pub const ALL: [EnvironmentalFactor; 4] = [
        EnvironmentalFactor::Temperature,
        EnvironmentalFactor::Humidity,
        EnvironmentalFactor::Precipitation,
        EnvironmentalFactor::WindSpeed,
    ];

    /// Range of values that favours fungal and insect proliferation
    pub fn optimal_range(&self) -> OptimalRange {
        match self {
            EnvironmentalFactor::Temperature => OptimalRange::new(20.0, 28.0),
            EnvironmentalFactor::Humidity => OptimalRange::new(80.0, 95.0),
            EnvironmentalFactor::Precipitation => OptimalRange::new(20.0, 60.0),
            EnvironmentalFactor::WindSpeed => OptimalRange::new(5.0, 15.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            EnvironmentalFactor::Temperature => "°C",
            EnvironmentalFactor::Humidity => "%",
            EnvironmentalFactor::Precipitation => "mm/7d",
            EnvironmentalFactor::WindSpeed => "m/s",
        }
    }
}

impl std::fmt::Display for EnvironmentalFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentalFactor::Temperature => write!(f, "temperature"),
            EnvironmentalFactor::Humidity => write!(f, "humidity"),
            EnvironmentalFactor::Precipitation => write!(f, "precipitation"),
            EnvironmentalFactor::WindSpeed => write!(f, "wind speed"),
        }
    }
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

impl OptimalRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Distance to the nearest bound, zero inside the range
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

/// Short-window direction of a weather observable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl std::fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTrend::Increasing => write!(f, "increasing"),
            RiskTrend::Stable => write!(f, "stable"),
            RiskTrend::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Scored weather observable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentalRiskFactor {
    pub factor: EnvironmentalFactor,
    pub current_value: f64,
    pub optimal_range: OptimalRange,
    /// Closeness to the pest-favourable range, [0, 1]
    pub risk_contribution: f64,
    pub description: String,
    pub trend: RiskTrend,
}

/// Outbreak risk level, ordered from low to extreme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Extreme => write!(f, "extreme"),
        }
    }
}
