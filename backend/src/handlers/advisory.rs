//! HTTP handlers for field advisory endpoints

use axum::Json;

use crate::error::AppResult;
use crate::services::advisory::{AdvisoryService, IrrigationInput, StressTrendInput};
use shared::{IrrigationPlan, StressTrendAnalysis};

/// Analyse stress trend from an NDVI history
pub async fn stress_trend(
    Json(input): Json<StressTrendInput>,
) -> AppResult<Json<StressTrendAnalysis>> {
    let analysis = AdvisoryService::new().stress_trend(input)?;
    Ok(Json(analysis))
}

/// Recommend irrigation for a field
pub async fn irrigation(Json(input): Json<IrrigationInput>) -> AppResult<Json<IrrigationPlan>> {
    let plan = AdvisoryService::new().irrigation(input)?;
    Ok(Json(plan))
}
