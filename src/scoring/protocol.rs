//! Treatment protocol selection.

use crate::models::{Condition, RiskAssessment, TreatmentProtocol};

/// Pick a protocol; the first matching rule wins.
pub fn classify_protocol(conditions: &[Condition], risk: &RiskAssessment) -> TreatmentProtocol {
    if risk.risk_score > 80 {
        TreatmentProtocol::AdvancedTraumaLifeSupport
    } else if conditions.iter().any(Condition::is_critical) {
        TreatmentProtocol::TraumaTeamActivation
    } else if risk.risk_score > 40 {
        TreatmentProtocol::EmergencyDepartmentPriority
    } else {
        TreatmentProtocol::StandardEmergency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use test_case::test_case;

    fn risk(score: u8) -> RiskAssessment {
        RiskAssessment {
            risk_score: score,
            concerning_values: Vec::new(),
            stability_index: 100 - score,
        }
    }

    #[test_case(85, true, TreatmentProtocol::AdvancedTraumaLifeSupport; "risk beats severity")]
    #[test_case(81, false, TreatmentProtocol::AdvancedTraumaLifeSupport; "high risk alone")]
    #[test_case(80, true, TreatmentProtocol::TraumaTeamActivation; "critical condition")]
    #[test_case(10, true, TreatmentProtocol::TraumaTeamActivation; "critical with low risk")]
    #[test_case(80, false, TreatmentProtocol::EmergencyDepartmentPriority; "elevated risk")]
    #[test_case(41, false, TreatmentProtocol::EmergencyDepartmentPriority; "just above forty")]
    #[test_case(40, false, TreatmentProtocol::StandardEmergency; "forty is standard")]
    #[test_case(0, false, TreatmentProtocol::StandardEmergency; "stable")]
    fn priority_chain(score: u8, critical: bool, expected: TreatmentProtocol) {
        let severity = if critical { Severity::Critical } else { Severity::High };
        let conditions = vec![Condition::new("Deep laceration", 90.0, severity)];
        assert_eq!(classify_protocol(&conditions, &risk(score)), expected);
    }

    #[test]
    fn no_conditions_uses_risk_only() {
        assert_eq!(
            classify_protocol(&[], &risk(60)),
            TreatmentProtocol::EmergencyDepartmentPriority
        );
    }
}
