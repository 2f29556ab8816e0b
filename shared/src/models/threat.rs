//! Pest and disease threat catalog models

use serde::{Deserialize, Serialize};

use crate::models::GrowthStage;

/// Biological category of a threat
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThreatType {
    Insect,
    Fungal,
    Bacterial,
    Viral,
    Nematode,
    Weed,
}

impl ThreatType {
    /// Pathogens whose spread is driven by leaf wetness
    pub fn is_moisture_driven(&self) -> bool {
        matches!(self, ThreatType::Fungal | ThreatType::Bacterial)
    }
}

impl std::fmt::Display for ThreatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatType::Insect => write!(f, "insect"),
            ThreatType::Fungal => write!(f, "fungal"),
            ThreatType::Bacterial => write!(f, "bacterial"),
            ThreatType::Viral => write!(f, "viral"),
            ThreatType::Nematode => write!(f, "nematode"),
            ThreatType::Weed => write!(f, "weed"),
        }
    }
}

/// Inherent economic impact of a threat once established
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImpactSeverity {
    Low,
    Moderate,
    High,
    Severe,
    Extreme,
}

impl std::fmt::Display for ImpactSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactSeverity::Low => write!(f, "low"),
            ImpactSeverity::Moderate => write!(f, "moderate"),
            ImpactSeverity::High => write!(f, "high"),
            ImpactSeverity::Severe => write!(f, "severe"),
            ImpactSeverity::Extreme => write!(f, "extreme"),
        }
    }
}

/// One pest or disease in the per-crop threat catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreatDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    pub threat_type: ThreatType,
    /// Baseline regional prevalence, [0, 1]
    pub baseline_risk: f64,
    pub severity: ImpactSeverity,
    /// Extra susceptibility while the crop is in a vulnerable stage, [0, 1]
    pub stage_vulnerability: f64,
    #[serde(default)]
    pub vulnerable_stages: Vec<GrowthStage>,
    #[serde(default)]
    pub damage_description: String,
    #[serde(default)]
    pub treatment_options: Vec<String>,
    #[serde(default)]
    pub preventive_measures: Vec<String>,
}

impl ThreatDefinition {
    pub fn is_vulnerable_at(&self, stage: GrowthStage) -> bool {
        self.vulnerable_stages.contains(&stage)
    }

    /// Rust diseases follow a summer peak season
    pub fn is_rust(&self) -> bool {
        self.name.to_lowercase().contains("rust") || self.id.to_lowercase().contains("rust")
    }
}
