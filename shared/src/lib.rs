//! Shared types and analysis core for the AgriSense platform
//!
//! This crate contains the vegetation-index, field-health and outbreak-risk
//! calculators shared between the backend, the frontend (via WASM) and any
//! other component that needs to score a field.

pub mod analysis;
pub mod catalog;
pub mod error;
mod maybe_rayon;
pub mod models;
pub mod types;
pub mod validation;

pub use analysis::*;
pub use catalog::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
