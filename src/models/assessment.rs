use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// Outcome of scoring a set of vitals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Always within 0..=100.
    pub risk_score: u8,
    /// One entry per triggered threshold, in check order.
    pub concerning_values: Vec<String>,
    /// 100 - risk_score.
    pub stability_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Immediate,
    Urgent,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: String,
    pub priority: Priority,
    pub timeframe: String,
}

impl Recommendation {
    pub fn new(action: &str, priority: Priority, timeframe: &str) -> Self {
        Self {
            action: action.to_string(),
            priority,
            timeframe: timeframe.to_string(),
        }
    }
}

/// Treatment protocol chosen for a patient. Serialized as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreatmentProtocol {
    #[serde(rename = "Advanced Trauma Life Support (ATLS) - Critical")]
    AdvancedTraumaLifeSupport,
    #[serde(rename = "Trauma Team Activation - Level 1")]
    TraumaTeamActivation,
    #[serde(rename = "Emergency Department - Priority")]
    EmergencyDepartmentPriority,
    #[serde(rename = "Standard Emergency Protocol")]
    StandardEmergency,
}

impl TreatmentProtocol {
    pub fn label(&self) -> &'static str {
        match self {
            TreatmentProtocol::AdvancedTraumaLifeSupport => {
                "Advanced Trauma Life Support (ATLS) - Critical"
            }
            TreatmentProtocol::TraumaTeamActivation => "Trauma Team Activation - Level 1",
            TreatmentProtocol::EmergencyDepartmentPriority => "Emergency Department - Priority",
            TreatmentProtocol::StandardEmergency => "Standard Emergency Protocol",
        }
    }
}

impl fmt::Display for TreatmentProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full result of an assessment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub risk: RiskAssessment,
    pub conditions: Vec<Condition>,
    pub recommendations: Vec<Recommendation>,
    /// Actions of the `immediate` recommendations, in order.
    pub immediate_actions: Vec<String>,
    pub treatment_protocol: TreatmentProtocol,
    /// Percentage in 20..=95, unrounded.
    pub estimated_survival_rate: f64,
    pub overall_confidence: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_serializes_as_label() {
        let json = serde_json::to_string(&TreatmentProtocol::TraumaTeamActivation).unwrap();
        assert_eq!(json, "\"Trauma Team Activation - Level 1\"");
        assert_eq!(
            TreatmentProtocol::AdvancedTraumaLifeSupport.to_string(),
            "Advanced Trauma Life Support (ATLS) - Critical"
        );
    }

    #[test]
    fn priorities_order_most_pressing_first() {
        let mut priorities = vec![Priority::Standard, Priority::Immediate, Priority::Urgent];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::Immediate, Priority::Urgent, Priority::Standard]
        );
    }
}
