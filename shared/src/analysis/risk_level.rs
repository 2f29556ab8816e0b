//! Risk level classification for single threats and whole fields

use crate::models::{ImpactSeverity, RiskLevel, ThreatPrediction};

/// Threshold scaling for inherently damaging threats
///
/// Multiplies the level thresholds, which is the same as dividing the
/// probability by it. The probability itself is never scaled up, so a severe
/// threat is rated high at a lower raw probability than a low-impact one.
pub fn severity_factor(severity: ImpactSeverity) -> f64 {
    match severity {
        ImpactSeverity::Severe | ImpactSeverity::Extreme => 0.8,
        ImpactSeverity::High => 0.9,
        ImpactSeverity::Moderate | ImpactSeverity::Low => 1.0,
    }
}

/// Classify a threat's outbreak probability, adjusted for its severity
pub fn classify_risk_level(probability: f64, severity: ImpactSeverity) -> RiskLevel {
    let factor = severity_factor(severity);
    if probability >= 0.75 * factor {
        RiskLevel::Extreme
    } else if probability >= 0.5 * factor {
        RiskLevel::High
    } else if probability >= 0.25 * factor {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Field-level risk from the ranked threat list
pub fn overall_risk_level(threats: &[ThreatPrediction]) -> RiskLevel {
    let elevated = threats
        .iter()
        .filter(|t| t.risk_level >= RiskLevel::High)
        .count();
    let peak = threats
        .iter()
        .map(|t| t.probability)
        .fold(0.0_f64, f64::max);

    if elevated >= 3 || peak >= 0.8 {
        RiskLevel::Extreme
    } else if elevated >= 2 || peak >= 0.6 {
        RiskLevel::High
    } else if elevated >= 1 || peak >= 0.4 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
