//! Error types for the analysis core
//!
//! Degenerate numeric input never produces an error: the calculators return a
//! defined sentinel instead. Errors are reserved for questions the core cannot
//! answer, such as a crop the threat catalog knows nothing about.

use thiserror::Error;

/// Analysis error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unsupported crop type: {0}")]
    UnsupportedCropType(String),

    #[error("Threat '{threat_id}' not found for crop type '{crop_type}'")]
    ThreatNotFound {
        crop_type: String,
        threat_id: String,
    },

    #[error("At least {required} observations required, got {actual}")]
    InsufficientObservations { required: usize, actual: usize },

    #[error("Invalid threat catalog: {0}")]
    InvalidCatalog(String),
}

/// Result type alias for the analysis core
pub type AnalysisResult<T> = Result<T, AnalysisError>;
