//! Threat catalog loading and lookup

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use shared::{CropType, ThreatCatalog, ThreatDefinition};

use crate::config::CatalogConfig;
use crate::error::AppResult;

/// Load the configured catalog, falling back to the built-in one
pub fn load_catalog(config: &CatalogConfig) -> anyhow::Result<ThreatCatalog> {
    let catalog = match &config.path {
        Some(path) => {
            tracing::info!("Loading threat catalog from {}", path);
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading threat catalog {}", path))?;
            ThreatCatalog::from_json(&json)?
        }
        None => {
            tracing::info!("Using built-in threat catalog");
            ThreatCatalog::builtin()?
        }
    };
    tracing::info!("Threat catalog covers {} crop types", catalog.len());
    Ok(catalog)
}

/// Summary of one supported crop
#[derive(Debug, Clone, Serialize)]
pub struct CropSummary {
    pub crop_type: CropType,
    pub threat_count: usize,
}

/// Read-only access to the shared threat catalog
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<ThreatCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<ThreatCatalog>) -> Self {
        Self { catalog }
    }

    /// List supported crops with their threat counts
    pub fn list_crops(&self) -> Vec<CropSummary> {
        self.catalog
            .crop_types()
            .into_iter()
            .map(|crop_type| {
                let threat_count = self
                    .catalog
                    .threats_for(&crop_type)
                    .map(|t| t.len())
                    .unwrap_or(0);
                CropSummary {
                    crop_type,
                    threat_count,
                }
            })
            .collect()
    }

    /// All threats recorded for a crop
    pub fn threats_for(&self, crop_type: &str) -> AppResult<Vec<ThreatDefinition>> {
        let crop = CropType::from(crop_type);
        Ok(self.catalog.threats_for(&crop)?.to_vec())
    }

    /// A single threat definition
    pub fn threat(&self, crop_type: &str, threat_id: &str) -> AppResult<ThreatDefinition> {
        let crop = CropType::from(crop_type);
        Ok(self.catalog.threat(&crop, threat_id)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(ThreatCatalog::builtin().unwrap()))
    }

    #[test]
    fn test_list_crops() {
        let crops = service().list_crops();
        assert_eq!(crops.len(), 4);
        assert!(crops.iter().all(|c| c.threat_count > 0));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(service().threats_for("Maize").is_ok());
        assert!(matches!(
            service().threats_for("cassava"),
            Err(AppError::UnsupportedCropType(_))
        ));
    }

    #[test]
    fn test_load_builtin_when_no_path() {
        let catalog = load_catalog(&CatalogConfig::default()).unwrap();
        assert!(catalog.supports(&CropType::Rice));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let config = CatalogConfig {
            path: Some("/nonexistent/catalog.json".to_string()),
        };
        assert!(load_catalog(&config).is_err());
    }
}
