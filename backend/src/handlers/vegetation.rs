//! HTTP handlers for vegetation index and crop health endpoints

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::services::vegetation::{
    AssessHealthInput, BatchIndicesInput, FieldAnalysisInput, FieldStatisticsInput,
    VegetationService,
};
use crate::AppState;
use shared::{
    FieldAnalysis, FieldIndexStatistics, HealthAssessment, SpectralSample, VegetationIndexSet,
};

fn service(state: &AppState) -> VegetationService {
    VegetationService::new(state.config.analysis.max_pixels_per_request)
}

/// Run CPU-bound pixel work off the async runtime
async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("analysis task failed: {}", e)))?
}

/// Compute vegetation indices for one sample
pub async fn compute_indices(
    State(state): State<AppState>,
    Json(sample): Json<SpectralSample>,
) -> AppResult<Json<VegetationIndexSet>> {
    let indices = service(&state).compute_indices(sample)?;
    Ok(Json(indices))
}

/// Compute vegetation indices for a batch of samples
pub async fn compute_indices_batch(
    State(state): State<AppState>,
    Json(input): Json<BatchIndicesInput>,
) -> AppResult<Json<Vec<VegetationIndexSet>>> {
    let service = service(&state);
    let indices = run_blocking(move || service.compute_batch(input)).await?;
    Ok(Json(indices))
}

/// Aggregate per-pixel index values into field statistics
pub async fn field_statistics(
    State(state): State<AppState>,
    Json(input): Json<FieldStatisticsInput>,
) -> AppResult<Json<FieldIndexStatistics>> {
    let statistics = service(&state).field_statistics(input)?;
    Ok(Json(statistics))
}

/// Classify crop health
pub async fn assess_health(
    State(state): State<AppState>,
    Json(input): Json<AssessHealthInput>,
) -> AppResult<Json<HealthAssessment>> {
    Ok(Json(service(&state).assess_health(input)))
}

/// Analyse a whole field acquisition
pub async fn analyze_field(
    State(state): State<AppState>,
    Json(input): Json<FieldAnalysisInput>,
) -> AppResult<Json<FieldAnalysis>> {
    let service = service(&state);
    let analysis = run_blocking(move || service.analyze_field(input)).await?;
    Ok(Json(analysis))
}
