//! Route definitions for the AgriSense analysis API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/vegetation", vegetation_routes())
        .nest("/outbreaks", outbreak_routes())
        .nest("/catalog", catalog_routes())
        .nest("/advisory", advisory_routes())
}

/// Vegetation index and crop health routes
fn vegetation_routes() -> Router<AppState> {
    Router::new()
        .route("/indices", post(handlers::compute_indices))
        .route("/indices/batch", post(handlers::compute_indices_batch))
        .route("/statistics", post(handlers::field_statistics))
        .route("/health", post(handlers::assess_health))
        .route("/field-analysis", post(handlers::analyze_field))
}

/// Outbreak prediction routes
fn outbreak_routes() -> Router<AppState> {
    Router::new().route("/predict", post(handlers::predict_outbreaks))
}

/// Threat catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/crops", get(handlers::list_crops))
        .route("/:crop_type", get(handlers::list_threats))
        .route("/:crop_type/:threat_id", get(handlers::get_threat))
}

/// Field advisory routes
fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route("/stress-trend", post(handlers::stress_trend))
        .route("/irrigation", post(handlers::irrigation))
}
