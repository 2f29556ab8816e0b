//! Outbreak risk scoring integration tests
//!
//! Tests for the outbreak engine including:
//! - Probability and confidence bounds
//! - Risk level monotonicity
//! - Ranked prediction for a favourable corn week

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    classify_risk_level, estimate_confidence, outbreak_probability, predict_outbreaks,
    score_environment, score_factor, AnalysisError, CropStageInfo, CropType, DailyForecast,
    EnvironmentalFactor, GrowthStage, ImpactSeverity, OutbreakContext, PredictionOptions,
    RiskLevel, RiskTrend, ThreatCatalog, ThreatDefinition, ThreatType, WeatherForecast,
};
use uuid::Uuid;

fn july(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
}

/// Seven days averaging 24 °C, 90 % humidity, 40 mm total rain and 8 m/s wind
fn favourable_corn_week() -> WeatherForecast {
    let days = (0..7)
        .map(|i| DailyForecast {
            date: july(1) + Duration::days(i),
            temperature_min_celsius: 20.0,
            temperature_max_celsius: 28.0,
            humidity_percent: 90.0,
            precipitation_mm: 40.0 / 7.0,
            wind_speed_mps: 8.0,
        })
        .collect();
    WeatherForecast::new(days, 0.9)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Every observable sits inside its favourable range
    #[test]
    fn test_favourable_week_scores_full_contribution() {
        let factors = score_environment(&favourable_corn_week());
        assert_eq!(factors.len(), 4);
        for factor in &factors {
            assert_eq!(factor.risk_contribution, 1.0, "{:?}", factor.factor);
            assert_eq!(factor.trend, RiskTrend::Stable);
        }
    }

    /// Northern corn leaf blight in late vegetative stage during a wet July
    #[test]
    fn test_corn_leaf_blight_scenario() {
        let catalog = ThreatCatalog::builtin().unwrap();
        let stage = CropStageInfo::new(GrowthStage::VegetativeLate);
        let prediction = predict_outbreaks(
            Uuid::new_v4(),
            &CropType::Corn,
            &favourable_corn_week(),
            &stage,
            &catalog,
            &PredictionOptions::new(july(1)),
        )
        .unwrap();

        let blight = prediction
            .threats
            .iter()
            .find(|t| t.threat_id == "northern_corn_leaf_blight")
            .expect("leaf blight should qualify");
        // 0.3 * 1.5 * 1.4 * 1.3
        assert!((blight.probability - 0.819).abs() < 1e-9);
        assert_eq!(blight.risk_level, RiskLevel::Extreme);
        assert!(blight.stage_vulnerable);
        assert!(prediction.overall_risk_level >= RiskLevel::High);
        assert!(prediction.highest_risk().unwrap().probability >= blight.probability);
        assert!(prediction
            .threats_at_or_above(RiskLevel::Extreme)
            .any(|t| t.threat_id == "northern_corn_leaf_blight"));
    }

    /// Unknown crops are rejected rather than scored against a default list
    #[test]
    fn test_unsupported_crop() {
        let catalog = ThreatCatalog::builtin().unwrap();
        let result = predict_outbreaks(
            Uuid::new_v4(),
            &CropType::from("cassava"),
            &favourable_corn_week(),
            &CropStageInfo::new(GrowthStage::Flowering),
            &catalog,
            &PredictionOptions::new(july(1)),
        );
        assert!(matches!(result, Err(AnalysisError::UnsupportedCropType(name)) if name == "cassava"));
    }

    /// A raised reporting threshold only ever removes threats
    #[test]
    fn test_reporting_threshold_filters() {
        let catalog = ThreatCatalog::builtin().unwrap();
        let stage = CropStageInfo::new(GrowthStage::Flowering);
        let run = |threshold: f64| {
            predict_outbreaks(
                Uuid::nil(),
                &CropType::Soybean,
                &favourable_corn_week(),
                &stage,
                &catalog,
                &PredictionOptions::new(july(1)).with_reporting_threshold(threshold),
            )
            .unwrap()
        };
        let all = run(0.0);
        let strict = run(0.7);
        assert_eq!(all.threats.len(), catalog.threats_for(&CropType::Soybean).unwrap().len());
        assert!(strict.threats.len() < all.threats.len());
        assert!(strict.threats.iter().all(|t| t.probability >= 0.7));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn threat_type() -> impl Strategy<Value = ThreatType> {
        prop_oneof![
            Just(ThreatType::Insect),
            Just(ThreatType::Fungal),
            Just(ThreatType::Bacterial),
            Just(ThreatType::Viral),
            Just(ThreatType::Nematode),
            Just(ThreatType::Weed),
        ]
    }

    fn severity() -> impl Strategy<Value = ImpactSeverity> {
        prop_oneof![
            Just(ImpactSeverity::Low),
            Just(ImpactSeverity::Moderate),
            Just(ImpactSeverity::High),
            Just(ImpactSeverity::Severe),
            Just(ImpactSeverity::Extreme),
        ]
    }

    fn growth_stage() -> impl Strategy<Value = GrowthStage> {
        prop_oneof![
            Just(GrowthStage::Germination),
            Just(GrowthStage::Emergence),
            Just(GrowthStage::VegetativeEarly),
            Just(GrowthStage::VegetativeLate),
            Just(GrowthStage::Flowering),
            Just(GrowthStage::Fruiting),
            Just(GrowthStage::GrainFill),
            Just(GrowthStage::Maturity),
        ]
    }

    fn threat() -> impl Strategy<Value = ThreatDefinition> {
        (
            threat_type(),
            severity(),
            0.0f64..=1.0,
            prop::collection::vec(growth_stage(), 0..4),
            prop::bool::ANY,
        )
            .prop_map(|(threat_type, severity, vulnerability, stages, rust)| ThreatDefinition {
                id: if rust { "stem_rust" } else { "leaf_spot" }.to_string(),
                name: if rust { "Stem Rust" } else { "Leaf Spot" }.to_string(),
                scientific_name: None,
                threat_type,
                baseline_risk: 0.3,
                severity,
                stage_vulnerability: vulnerability,
                vulnerable_stages: stages,
                damage_description: String::new(),
                treatment_options: vec![],
                preventive_measures: vec![],
            })
    }

    fn forecast() -> impl Strategy<Value = WeatherForecast> {
        (
            prop::collection::vec(
                (-5.0f64..40.0, 0.0f64..15.0, 0.0f64..=100.0, 0.0f64..60.0, 0.0f64..30.0),
                1..=16,
            ),
            0.0f64..=1.0,
        )
            .prop_map(|(rows, confidence)| {
                let days = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, (t_min, spread, humidity, rain, wind))| DailyForecast {
                        date: july(1) + Duration::days(i as i64),
                        temperature_min_celsius: t_min,
                        temperature_max_celsius: t_min + spread,
                        humidity_percent: humidity,
                        precipitation_mm: rain,
                        wind_speed_mps: wind,
                    })
                    .collect();
                WeatherForecast::new(days, confidence)
            })
    }

    fn crop_type() -> impl Strategy<Value = CropType> {
        prop_oneof![
            Just(CropType::Corn),
            Just(CropType::Soybean),
            Just(CropType::Wheat),
            Just(CropType::Rice),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Outbreak probability always stays within [0.05, 0.95]
        #[test]
        fn prop_probability_bounded(
            threat in threat(),
            stage in growth_stage(),
            values in prop::collection::vec(-50.0f64..200.0, 4),
            rain_3d in 0.0f64..100.0,
            month in 1u32..=12,
        ) {
            let factors: Vec<_> = EnvironmentalFactor::ALL
                .iter()
                .zip(&values)
                .map(|(&f, &v)| score_factor(f, v, RiskTrend::Stable))
                .collect();
            let ctx = OutbreakContext { factors: &factors, stage, precipitation_3d_mm: rain_3d, month };
            let p = outbreak_probability(&threat, &ctx);
            prop_assert!((0.05..=0.95).contains(&p), "probability {} out of range", p);
        }

        /// Prediction confidence always stays within [0.6, 0.95]
        #[test]
        fn prop_confidence_bounded(
            values in prop::collection::vec(-50.0f64..200.0, 4),
            forecast_confidence in -1.0f64..2.0,
            qualifying in 0usize..20,
        ) {
            let factors: Vec<_> = EnvironmentalFactor::ALL
                .iter()
                .zip(&values)
                .map(|(&f, &v)| score_factor(f, v, RiskTrend::Stable))
                .collect();
            let c = estimate_confidence(&factors, forecast_confidence, qualifying);
            prop_assert!((0.6..=0.95).contains(&c), "confidence {} out of range", c);
        }

        /// A higher probability never yields a lower risk level
        #[test]
        fn prop_risk_level_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0, s in severity()) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_risk_level(low, s) <= classify_risk_level(high, s));
        }

        /// A more severe threat never yields a lower risk level
        #[test]
        fn prop_severity_escalates(p in 0.0f64..=1.0, a in severity(), b in severity()) {
            let (mild, harsh) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_risk_level(p, mild) <= classify_risk_level(p, harsh));
        }

        /// Reported threats are qualifying, bounded and ranked
        #[test]
        fn prop_prediction_ranked(
            crop in crop_type(),
            stage in growth_stage(),
            forecast in forecast(),
        ) {
            let catalog = ThreatCatalog::builtin().unwrap();
            let prediction = predict_outbreaks(
                Uuid::nil(),
                &crop,
                &forecast,
                &CropStageInfo::new(stage),
                &catalog,
                &PredictionOptions::new(july(1)),
            )
            .unwrap();

            for t in &prediction.threats {
                prop_assert!(t.probability >= 0.4 && t.probability <= 0.95);
            }
            for pair in prediction.threats.windows(2) {
                prop_assert!(pair[0].probability >= pair[1].probability);
            }
            prop_assert!((0.6..=0.95).contains(&prediction.confidence));
            prop_assert_eq!(prediction.environmental_factors.len(), 4);
        }
    }
}
