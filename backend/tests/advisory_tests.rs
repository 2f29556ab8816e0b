//! Stress trend and irrigation advisory integration tests

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    analyze_stress_trend, plan_irrigation, AnalysisError, DailyForecast, GrowthStage,
    IrrigationTiming, IrrigationUrgency, NdviObservation, NdviTrend, SoilWaterProfile,
    StressLevel, TrendSignificance, WeatherForecast,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn series(values: &[f64]) -> Vec<NdviObservation> {
    values
        .iter()
        .enumerate()
        .map(|(i, &ndvi)| NdviObservation {
            date: start() + Duration::days(7 * i as i64),
            ndvi,
        })
        .collect()
}

fn week(temp: f64, humidity: f64, daily_rain: f64) -> WeatherForecast {
    let days = (0..7)
        .map(|i| DailyForecast {
            date: start() + Duration::days(i),
            temperature_min_celsius: temp - 5.0,
            temperature_max_celsius: temp + 5.0,
            humidity_percent: humidity,
            precipitation_mm: daily_rain,
            wind_speed_mps: 3.0,
        })
        .collect();
    WeatherForecast::new(days, 0.8)
}

// ============================================================================
// Stress Trend Tests
// ============================================================================

#[cfg(test)]
mod stress_trend_tests {
    use super::*;

    /// Weekly decline of 0.1 NDVI is a significant decline
    #[test]
    fn test_declining_series() {
        let analysis = analyze_stress_trend(&series(&[0.8, 0.7, 0.6, 0.5, 0.4])).unwrap();

        assert_eq!(analysis.direction, NdviTrend::Declining);
        assert_eq!(analysis.significance, TrendSignificance::High);
        assert_eq!(analysis.stress_level, StressLevel::Moderate);
        assert!((analysis.slope + 0.1).abs() < 1e-3);
        assert_eq!(analysis.observations, 5);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("declining vegetation health")));
    }

    /// Healthy flat canopy needs no action
    #[test]
    fn test_stable_healthy_series() {
        let analysis = analyze_stress_trend(&series(&[0.78, 0.8, 0.79, 0.8, 0.78])).unwrap();
        assert_eq!(analysis.direction, NdviTrend::Stable);
        assert_eq!(analysis.stress_level, StressLevel::Low);
        assert!(analysis.recommendations.is_empty());
        assert!(analysis.anomalies.is_empty());
    }

    /// Out-of-order observations are sorted by date first
    #[test]
    fn test_unsorted_input() {
        let mut observations = series(&[0.3, 0.4, 0.5, 0.6]);
        observations.reverse();
        let analysis = analyze_stress_trend(&observations).unwrap();
        assert_eq!(analysis.direction, NdviTrend::Improving);
        assert_eq!(analysis.date_range.start, start());
        assert_eq!(analysis.date_range.days(), 22);
    }

    /// Two observations cannot be analysed
    #[test]
    fn test_too_few_observations() {
        assert_eq!(
            analyze_stress_trend(&series(&[0.5, 0.6])).unwrap_err(),
            AnalysisError::InsufficientObservations {
                required: 3,
                actual: 2
            }
        );
    }
}

// ============================================================================
// Irrigation Tests
// ============================================================================

#[cfg(test)]
mod irrigation_tests {
    use super::*;

    fn profile(moisture: f64) -> SoilWaterProfile {
        SoilWaterProfile {
            soil_moisture: moisture,
            field_capacity: 0.4,
            wilting_point: 0.15,
            crop_stage: GrowthStage::Flowering,
        }
    }

    /// Dry soil with no rain is irrigated immediately to field capacity
    #[test]
    fn test_dry_soil_is_critical() {
        let plan = plan_irrigation(&profile(0.18), None);
        assert_eq!(plan.urgency, IrrigationUrgency::Critical);
        assert_eq!(plan.timing, IrrigationTiming::Immediate);
        assert!(plan.irrigation_needed);
        assert!((plan.recommended_amount_mm - 220.0).abs() < 1e-6);
    }

    /// Heavy forecast rain defers irrigation
    #[test]
    fn test_rain_defers_irrigation() {
        let plan = plan_irrigation(&profile(0.25), Some(&week(22.0, 70.0, 40.0)));
        assert_eq!(plan.timing, IrrigationTiming::DelayForRain);
        assert_eq!(plan.urgency, IrrigationUrgency::Low);
        assert!(!plan.irrigation_needed);
        assert!(plan
            .efficiency_tips
            .iter()
            .any(|t| t.contains("after expected rainfall")));
    }

    /// Wet soil only needs monitoring
    #[test]
    fn test_wet_soil_monitor() {
        let plan = plan_irrigation(&profile(0.38), Some(&week(22.0, 70.0, 0.0)));
        assert_eq!(plan.urgency, IrrigationUrgency::Low);
        assert_eq!(plan.timing, IrrigationTiming::Monitor);
        assert_eq!(plan.recommended_amount_mm, 0.0);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Confidence never exceeds 0.95 and every observation is counted
        #[test]
        fn prop_trend_bounded(values in prop::collection::vec(0.0f64..=1.0, 3..60)) {
            let analysis = analyze_stress_trend(&series(&values)).unwrap();
            prop_assert!(analysis.confidence <= 0.95);
            prop_assert_eq!(analysis.observations, values.len());
            prop_assert!(analysis.statistics.min <= analysis.statistics.max);
        }

        /// Input order does not change the analysis
        #[test]
        fn prop_trend_order_independent(values in prop::collection::vec(0.0f64..=1.0, 3..30)) {
            let forward = series(&values);
            let mut backward = forward.clone();
            backward.reverse();
            prop_assert_eq!(
                analyze_stress_trend(&forward).unwrap(),
                analyze_stress_trend(&backward).unwrap()
            );
        }

        /// Plans never recommend negative water and stress stays a fraction
        #[test]
        fn prop_irrigation_bounded(
            wilting in 0.05f64..0.2,
            capacity_gap in 0.1f64..0.3,
            fill in 0.0f64..=1.0,
            rain in 0.0f64..20.0,
            temp in 5.0f64..40.0,
        ) {
            let field_capacity = wilting + capacity_gap;
            let profile = SoilWaterProfile {
                soil_moisture: wilting + capacity_gap * fill,
                field_capacity,
                wilting_point: wilting,
                crop_stage: GrowthStage::VegetativeLate,
            };
            let plan = plan_irrigation(&profile, Some(&week(temp, 60.0, rain)));
            prop_assert!(plan.recommended_amount_mm >= 0.0);
            prop_assert!((0.0..=1.0).contains(&plan.water_stress_level));
            if plan.timing == IrrigationTiming::DelayForRain {
                prop_assert!(!plan.irrigation_needed);
            }
        }
    }
}
