//! Estimated survival rate.

use crate::models::{Condition, RiskAssessment, Severity};

pub const BASE_SURVIVAL_RATE: f64 = 95.0;
pub const MIN_SURVIVAL_RATE: f64 = 20.0;

/// Percentage in `[20, 95]`.
///
/// Every condition lowers the rate by its severity penalty (penalties add up
/// across conditions) and the risk score costs 0.3 points per point. The
/// result is not rounded.
pub fn estimate_survival(conditions: &[Condition], risk: &RiskAssessment) -> f64 {
    let penalty: f64 = conditions.iter().map(|c| severity_penalty(c.severity)).sum();
    let rate = BASE_SURVIVAL_RATE - penalty - f64::from(risk.risk_score) * 0.3;
    rate.clamp(MIN_SURVIVAL_RATE, BASE_SURVIVAL_RATE)
}

fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 15.0,
        Severity::High => 8.0,
        Severity::Moderate => 3.0,
        Severity::Low => 0.0,
    }
}
