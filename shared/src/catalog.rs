//! Per-crop pest and disease threat catalog
//!
//! The catalog is loaded once and then only read. Services hold it behind an
//! `Arc` and pass it by reference into [`crate::analysis::predict_outbreaks`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{CropType, ThreatDefinition};

const BUILTIN_CATALOG: &str = include_str!("../data/threat_catalog.json");

/// Immutable mapping from crop type to the threats it is exposed to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ThreatCatalog {
    threats: HashMap<CropType, Vec<ThreatDefinition>>,
}

impl ThreatCatalog {
    /// Catalog bundled with the crate: corn, soybean, wheat and rice
    pub fn builtin() -> AnalysisResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        let catalog: ThreatCatalog =
            serde_json::from_str(json).map_err(|e| AnalysisError::InvalidCatalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Build a catalog from already-parsed definitions
    pub fn from_threats(threats: HashMap<CropType, Vec<ThreatDefinition>>) -> AnalysisResult<Self> {
        let catalog = Self { threats };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> AnalysisResult<()> {
        for (crop, threats) in &self.threats {
            let mut seen = HashSet::new();
            for threat in threats {
                if threat.id.trim().is_empty() {
                    return Err(AnalysisError::InvalidCatalog(format!(
                        "threat with empty id for crop '{crop}'"
                    )));
                }
                if !seen.insert(threat.id.as_str()) {
                    return Err(AnalysisError::InvalidCatalog(format!(
                        "duplicate threat id '{}' for crop '{crop}'",
                        threat.id
                    )));
                }
                if !(0.0..=1.0).contains(&threat.baseline_risk) {
                    return Err(AnalysisError::InvalidCatalog(format!(
                        "baseline_risk of '{}' must be within [0, 1]",
                        threat.id
                    )));
                }
                if !(0.0..=1.0).contains(&threat.stage_vulnerability) {
                    return Err(AnalysisError::InvalidCatalog(format!(
                        "stage_vulnerability of '{}' must be within [0, 1]",
                        threat.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Threats for a crop, or `UnsupportedCropType` if the catalog has no entry
    pub fn threats_for(&self, crop: &CropType) -> AnalysisResult<&[ThreatDefinition]> {
        self.threats
            .get(crop)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::UnsupportedCropType(crop.to_string()))
    }

    pub fn threat(&self, crop: &CropType, threat_id: &str) -> AnalysisResult<&ThreatDefinition> {
        self.threats_for(crop)?
            .iter()
            .find(|t| t.id == threat_id)
            .ok_or_else(|| AnalysisError::ThreatNotFound {
                crop_type: crop.to_string(),
                threat_id: threat_id.to_string(),
            })
    }

    pub fn supports(&self, crop: &CropType) -> bool {
        self.threats.contains_key(crop)
    }

    /// Supported crops, sorted by name
    pub fn crop_types(&self) -> Vec<CropType> {
        let mut crops: Vec<CropType> = self.threats.keys().cloned().collect();
        crops.sort_by(|a, b| a.name().cmp(b.name()));
        crops
    }

    /// Number of supported crops
    pub fn len(&self) -> usize {
        self.threats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threats.is_empty()
    }
}
