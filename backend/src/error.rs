//! Error handling for the AgriSense analysis server
//!
//! Provides consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::AnalysisError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Too many pixels: {actual} exceeds limit of {limit}")]
    PayloadTooLarge { limit: usize, actual: usize },

    // Domain errors
    #[error("Unsupported crop type: {0}")]
    UnsupportedCropType(String),

    #[error("Threat '{threat_id}' not found for crop type '{crop_type}'")]
    ThreatNotFound {
        crop_type: String,
        threat_id: String,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::UnsupportedCropType(crop) => AppError::UnsupportedCropType(crop),
            AnalysisError::ThreatNotFound {
                crop_type,
                threat_id,
            } => AppError::ThreatNotFound {
                crop_type,
                threat_id,
            },
            err @ AnalysisError::InsufficientObservations { .. } => {
                AppError::InsufficientData(err.to_string())
            }
            AnalysisError::InvalidCatalog(msg) => AppError::Configuration(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors.field_errors().into_iter().next().map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            (field.to_string(), message)
        });

        match first {
            Some((field, message)) => AppError::Validation { field, message },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::PayloadTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail::new("PAYLOAD_TOO_LARGE", self.to_string()),
            ),
            AppError::UnsupportedCropType(crop) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "UNSUPPORTED_CROP_TYPE".to_string(),
                    message: format!("No threat catalog for crop type '{}'", crop),
                    field: Some("crop_type".to_string()),
                },
            ),
            AppError::ThreatNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("THREAT_NOT_FOUND", self.to_string()),
            ),
            AppError::InsufficientData(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("INSUFFICIENT_DATA", msg.clone()),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("CONFIGURATION_ERROR", format!("Configuration error: {}", msg)),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
