//! Environmental risk scoring from forecast weather
//!
//! Each observable is scored by how close it sits to the range that favours
//! pest and disease proliferation. The score is piecewise linear and is not
//! a probability.

use serde::{Deserialize, Serialize};

use super::{finite_or_zero, mean, round_to};
use crate::models::{
    DailyForecast, EnvironmentalFactor, EnvironmentalRiskFactor, OptimalRange, RiskTrend,
    WeatherForecast,
};

/// Days of forecast summarised into the scored observables
pub const SCORING_WINDOW_DAYS: usize = 7;
/// Days compared against the full window to derive a trend
pub const TREND_WINDOW_DAYS: usize = 3;
/// Relative change separating a trend from noise
const TREND_TOLERANCE: f64 = 0.05;

/// Observables summarised from a forecast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WeatherSummary {
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub precipitation_7d: f64,
    pub precipitation_3d: f64,
    pub mean_wind_speed: f64,
}

impl WeatherSummary {
    pub fn value_of(&self, factor: EnvironmentalFactor) -> f64 {
        match factor {
            EnvironmentalFactor::Temperature => self.mean_temperature,
            EnvironmentalFactor::Humidity => self.mean_humidity,
            EnvironmentalFactor::Precipitation => self.precipitation_7d,
            EnvironmentalFactor::WindSpeed => self.mean_wind_speed,
        }
    }
}

/// Closeness of `value` to `range`: 1 inside, falling linearly to 0 one range-width outside
pub fn risk_contribution(value: f64, range: OptimalRange) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if range.contains(value) {
        return 1.0;
    }
    let width = range.width();
    if width <= 0.0 {
        return 0.0;
    }
    (1.0 - range.distance(value) / width).max(0.0)
}

/// Summarise the scoring window of a forecast; an empty forecast summarises to zeros
pub fn summarize_forecast(forecast: &WeatherForecast) -> WeatherSummary {
    let window = forecast.window(SCORING_WINDOW_DAYS);
    let temperatures: Vec<f64> = window.iter().map(DailyForecast::mean_temperature).collect();
    let humidity: Vec<f64> = window.iter().map(|d| d.humidity_percent).collect();
    let wind: Vec<f64> = window.iter().map(|d| d.wind_speed_mps).collect();

    WeatherSummary {
        mean_temperature: finite_or_zero(mean(&temperatures)),
        mean_humidity: finite_or_zero(mean(&humidity)),
        precipitation_7d: finite_or_zero(forecast.precipitation_total(SCORING_WINDOW_DAYS)),
        precipitation_3d: finite_or_zero(forecast.precipitation_total(TREND_WINDOW_DAYS)),
        mean_wind_speed: finite_or_zero(mean(&wind)),
    }
}

/// Compare the leading days of a series with the whole series
pub fn series_trend(series: &[f64]) -> RiskTrend {
    if series.len() <= TREND_WINDOW_DAYS {
        return RiskTrend::Stable;
    }
    let recent = mean(&series[..TREND_WINDOW_DAYS]);
    let overall = mean(series);
    let tolerance = (overall.abs() * TREND_TOLERANCE).max(f64::EPSILON);
    if recent - overall > tolerance {
        RiskTrend::Increasing
    } else if overall - recent > tolerance {
        RiskTrend::Decreasing
    } else {
        RiskTrend::Stable
    }
}

fn daily_series(window: &[DailyForecast], factor: EnvironmentalFactor) -> Vec<f64> {
    window
        .iter()
        .map(|d| match factor {
            EnvironmentalFactor::Temperature => d.mean_temperature(),
            EnvironmentalFactor::Humidity => d.humidity_percent,
            EnvironmentalFactor::Precipitation => d.precipitation_mm,
            EnvironmentalFactor::WindSpeed => d.wind_speed_mps,
        })
        .collect()
}

fn describe(factor: EnvironmentalFactor, value: f64, range: OptimalRange) -> String {
    let unit = factor.unit();
    if range.contains(value) {
        format!(
            "{} of {:.1} {} is within the pest-favourable range {:.0}-{:.0} {}",
            capitalize(&factor.to_string()),
            value,
            unit,
            range.min,
            range.max,
            unit
        )
    } else {
        let direction = if value < range.min { "below" } else { "above" };
        format!(
            "{} of {:.1} {} is {:.1} {} {} the pest-favourable range {:.0}-{:.0} {}",
            capitalize(&factor.to_string()),
            value,
            unit,
            range.distance(value),
            unit,
            direction,
            range.min,
            range.max,
            unit
        )
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Score one observable against its pest-favourable range
pub fn score_factor(
    factor: EnvironmentalFactor,
    value: f64,
    trend: RiskTrend,
) -> EnvironmentalRiskFactor {
    let range = factor.optimal_range();
    EnvironmentalRiskFactor {
        factor,
        current_value: round_to(value, 2),
        optimal_range: range,
        risk_contribution: round_to(risk_contribution(value, range), 4),
        description: describe(factor, value, range),
        trend,
    }
}

/// Score temperature, humidity, precipitation and wind speed for a forecast
pub fn score_environment(forecast: &WeatherForecast) -> Vec<EnvironmentalRiskFactor> {
    let summary = summarize_forecast(forecast);
    let window = forecast.window(SCORING_WINDOW_DAYS);

    EnvironmentalFactor::ALL
        .iter()
        .map(|&factor| {
            let trend = series_trend(&daily_series(window, factor));
            score_factor(factor, summary.value_of(factor), trend)
        })
        .collect()
}

/// Look up one factor's contribution, 0 when absent
pub fn contribution_of(factors: &[EnvironmentalRiskFactor], factor: EnvironmentalFactor) -> f64 {
    factors
        .iter()
        .find(|f| f.factor == factor)
        .map(|f| f.risk_contribution)
        .unwrap_or(0.0)
}
