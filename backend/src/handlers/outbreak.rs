//! HTTP handlers for outbreak prediction endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::outbreak::{OutbreakService, PredictOutbreaksInput};
use crate::AppState;
use shared::OutbreakPrediction;

/// Predict pest and disease outbreaks for a field
pub async fn predict_outbreaks(
    State(state): State<AppState>,
    Json(input): Json<PredictOutbreaksInput>,
) -> AppResult<Json<OutbreakPrediction>> {
    let service = OutbreakService::new(state.catalog.clone(), state.config.analysis.clone());
    let prediction = service.predict(input)?;
    Ok(Json(prediction))
}
