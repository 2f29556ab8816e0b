//! Configuration management for the AgriSense analysis server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Threat catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Analysis tuning
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Path to a threat catalog JSON file; the built-in catalog is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Minimum outbreak probability for a threat to be reported
    pub reporting_threshold: f64,

    /// Forecast confidence assumed when the request carries none
    pub default_forecast_confidence: f64,

    /// Largest pixel batch accepted in one request
    pub max_pixels_per_request: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("analysis.reporting_threshold", 0.4)?
            .set_default("analysis.default_forecast_confidence", 0.8)?
            .set_default("analysis.max_pixels_per_request", 250_000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reporting_threshold: shared::DEFAULT_REPORTING_THRESHOLD,
            default_forecast_confidence: 0.8,
            max_pixels_per_request: 250_000,
        }
    }
}
