//! HTTP handlers for threat catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::catalog::{CatalogService, CropSummary};
use crate::AppState;
use shared::ThreatDefinition;

/// List crops covered by the threat catalog
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropSummary>> {
    Json(CatalogService::new(state.catalog).list_crops())
}

/// List threats for a crop
pub async fn list_threats(
    State(state): State<AppState>,
    Path(crop_type): Path<String>,
) -> AppResult<Json<Vec<ThreatDefinition>>> {
    let threats = CatalogService::new(state.catalog).threats_for(&crop_type)?;
    Ok(Json(threats))
}

/// Get one threat definition
pub async fn get_threat(
    State(state): State<AppState>,
    Path((crop_type, threat_id)): Path<(String, String)>,
) -> AppResult<Json<ThreatDefinition>> {
    let threat = CatalogService::new(state.catalog).threat(&crop_type, &threat_id)?;
    Ok(Json(threat))
}
