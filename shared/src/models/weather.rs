//! Weather forecast models consumed by the risk scorer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily weather forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature_min_celsius: f64,
    pub temperature_max_celsius: f64,
    pub humidity_percent: f64,
    pub precipitation_mm: f64,
    pub wind_speed_mps: f64,
}

impl DailyForecast {
    pub fn mean_temperature(&self) -> f64 {
        (self.temperature_min_celsius + self.temperature_max_celsius) / 2.0
    }
}

/// Multi-day forecast for a field, as supplied by the forecast service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherForecast {
    pub days: Vec<DailyForecast>,
    /// Forecast provider's own confidence, [0, 1]
    #[serde(default = "default_forecast_confidence")]
    pub confidence: f64,
}

fn default_forecast_confidence() -> f64 {
    0.8
}

impl WeatherForecast {
    pub fn new(days: Vec<DailyForecast>, confidence: f64) -> Self {
        Self { days, confidence }
    }

    /// The first `n` forecast days (fewer if the forecast is shorter)
    pub fn window(&self, n: usize) -> &[DailyForecast] {
        &self.days[..self.days.len().min(n)]
    }

    /// Total precipitation over the first `n` days
    pub fn precipitation_total(&self, n: usize) -> f64 {
        self.window(n).iter().map(|d| d.precipitation_mm).sum()
    }
}
