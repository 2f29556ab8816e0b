//! Crop stress trends from an NDVI time series

use super::{mean, population_std_dev, round_to};
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{
    AnomalyKind, NdviAnomaly, NdviObservation, NdviTrend, StressLevel, StressTrendAnalysis,
    TrendSignificance, TrendStatistics,
};
use crate::types::DateRange;

pub const MIN_TREND_OBSERVATIONS: usize = 3;
/// Slope per observation separating a trend from a flat series
const TREND_SLOPE: f64 = 0.01;
const HIGH_SIGNIFICANCE_SLOPE: f64 = 0.02;
const MODERATE_SIGNIFICANCE_SLOPE: f64 = 0.005;
/// Standard deviations from the mean that make an observation anomalous
const ANOMALY_SIGMA: f64 = 2.0;

/// Least-squares slope of `values` against their index
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Stress level from the series mean
pub fn stress_from_mean_ndvi(mean_ndvi: f64) -> StressLevel {
    if mean_ndvi > 0.7 {
        StressLevel::Low
    } else if mean_ndvi > 0.5 {
        StressLevel::Moderate
    } else if mean_ndvi > 0.3 {
        StressLevel::High
    } else {
        StressLevel::Severe
    }
}

fn direction(slope: f64) -> NdviTrend {
    if slope > TREND_SLOPE {
        NdviTrend::Improving
    } else if slope < -TREND_SLOPE {
        NdviTrend::Declining
    } else {
        NdviTrend::Stable
    }
}

fn significance(slope: f64) -> TrendSignificance {
    let magnitude = slope.abs();
    if magnitude > HIGH_SIGNIFICANCE_SLOPE {
        TrendSignificance::High
    } else if magnitude > MODERATE_SIGNIFICANCE_SLOPE {
        TrendSignificance::Moderate
    } else {
        TrendSignificance::Low
    }
}

fn recommendations(
    stress_level: StressLevel,
    trend: NdviTrend,
    anomalies: &[NdviAnomaly],
) -> Vec<String> {
    let mut recs: Vec<&str> = Vec::new();

    match stress_level {
        StressLevel::Severe => recs.extend([
            "Immediate irrigation required to prevent crop damage",
            "Consider emergency nutrient application",
            "Investigate potential pest or disease issues",
        ]),
        StressLevel::High => recs.extend([
            "Increase irrigation frequency",
            "Monitor for pest and disease pressure",
            "Consider stress-reducing treatments",
        ]),
        StressLevel::Moderate => recs.extend([
            "Optimize irrigation timing",
            "Monitor crop development closely",
        ]),
        StressLevel::Low | StressLevel::None => {}
    }

    match trend {
        NdviTrend::Declining => recs.extend([
            "Investigate causes of declining vegetation health",
            "Consider soil testing for nutrient deficiencies",
        ]),
        NdviTrend::Improving => recs.push("Continue current management practices"),
        NdviTrend::Stable => {}
    }

    if anomalies.len() > 2 {
        recs.extend([
            "High variability detected - investigate field uniformity",
            "Consider precision management approaches",
        ]);
    }

    recs.into_iter().map(String::from).collect()
}

/// Analyse a field's NDVI history for stress, trend and anomalies
///
/// Observations are ordered by date before fitting. Fewer than three
/// observations cannot be analysed.
pub fn analyze_stress_trend(observations: &[NdviObservation]) -> AnalysisResult<StressTrendAnalysis> {
    if observations.len() < MIN_TREND_OBSERVATIONS {
        return Err(AnalysisError::InsufficientObservations {
            required: MIN_TREND_OBSERVATIONS,
            actual: observations.len(),
        });
    }

    let mut series = observations.to_vec();
    series.sort_by_key(|o| o.date);
    let values: Vec<f64> = series.iter().map(|o| o.ndvi).collect();

    let mean_ndvi = mean(&values);
    let std_dev = population_std_dev(&values, mean_ndvi);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let cv = if mean_ndvi > 0.0 { std_dev / mean_ndvi } else { 0.0 };
    let slope = linear_slope(&values);

    let threshold = ANOMALY_SIGMA * std_dev;
    let anomalies: Vec<NdviAnomaly> = series
        .iter()
        .filter(|o| (o.ndvi - mean_ndvi).abs() > threshold)
        .map(|o| NdviAnomaly {
            date: o.date,
            ndvi: o.ndvi,
            deviation: round_to((o.ndvi - mean_ndvi).abs(), 4),
            kind: if o.ndvi < mean_ndvi {
                AnomalyKind::Low
            } else {
                AnomalyKind::High
            },
        })
        .collect();

    let stress_level = stress_from_mean_ndvi(mean_ndvi);
    let trend = direction(slope);
    let date_range = DateRange::new(series[0].date, series[series.len() - 1].date);

    Ok(StressTrendAnalysis {
        stress_level,
        confidence: round_to((0.7 + (1.0 - cv) * 0.25).min(0.95), 3),
        statistics: TrendStatistics {
            mean: round_to(mean_ndvi, 3),
            std_dev: round_to(std_dev, 3),
            min: round_to(min, 3),
            max: round_to(max, 3),
            coefficient_of_variation: round_to(cv, 3),
        },
        direction: trend,
        slope: round_to(slope, 4),
        significance: significance(slope),
        recommendations: recommendations(stress_level, trend, &anomalies),
        anomalies,
        observations: series.len(),
        date_range,
    })
}
