//! Recommended actions for an assessed patient.

use crate::models::{Condition, ConditionCategory, Priority, Recommendation, RiskAssessment};

/// Risk score above which an immediate ABC assessment is recommended.
pub const ABC_RISK_THRESHOLD: u8 = 70;

/// Build the ordered list of recommendations.
///
/// Rules are evaluated in a fixed order and are not exclusive. The critical
/// rule fires once no matter how many critical conditions there are, and
/// continuous monitoring is always appended last.
pub fn recommend(conditions: &[Condition], risk: &RiskAssessment) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if risk.risk_score > ABC_RISK_THRESHOLD {
        recommendations.push(Recommendation::new(
            "Immediate airway, breathing, circulation (ABC) assessment",
            Priority::Immediate,
            "Now",
        ));
    }

    if conditions.iter().any(Condition::is_critical) {
        recommendations.push(Recommendation::new(
            "Activate trauma team - Level 1 response",
            Priority::Immediate,
            "< 2 minutes",
        ));
        recommendations.push(Recommendation::new(
            "Secure IV access - two large bore (14-16G) lines",
            Priority::Immediate,
            "< 5 minutes",
        ));
    }

    if conditions
        .iter()
        .any(|c| c.category == ConditionCategory::Fracture)
    {
        recommendations.push(Recommendation::new(
            "Immobilize fracture site - apply splint/traction",
            Priority::Urgent,
            "< 10 minutes",
        ));
    }

    recommendations.push(Recommendation::new(
        "Continuous cardiac monitoring and pulse oximetry",
        Priority::Urgent,
        "< 3 minutes",
    ));

    recommendations
}
