//! The assessment pipeline: vitals and injury findings in, triage report out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use super::imaging::{ImageAnalysis, ImageAnalyzer};
use super::{classify_protocol, estimate_survival, normalize, recommend, score};
use crate::models::{AnalysisReport, Condition, PatientDetails, Priority, VitalSigns};

/// One assessment request as submitted by the field form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// File name of the uploaded injury image.
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub vital_signs: VitalSigns,
    #[serde(default)]
    pub patient_data: Option<PatientDetails>,
    /// Findings already known to the caller. When present the image is not
    /// analyzed.
    #[serde(default)]
    #[validate]
    pub conditions: Vec<Condition>,
}

/// Runs the full assessment for a request.
#[derive(Clone)]
pub struct Assessor {
    analyzer: Arc<dyn ImageAnalyzer>,
}

impl Assessor {
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self { analyzer }
    }

    #[instrument(skip_all, fields(image = request.image_name.as_deref().unwrap_or("-")))]
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let (conditions, source_confidence) = if !request.conditions.is_empty() {
            let conditions = request.conditions.clone();
            let mean = mean_confidence(&conditions);
            (conditions, Some(mean))
        } else if let Some(image_name) = request.image_name.as_deref() {
            let ImageAnalysis {
                conditions,
                confidence,
            } = self.analyzer.analyze(image_name);
            (conditions, Some(confidence))
        } else {
            (Vec::new(), None)
        };

        if let Some(incident) = request
            .patient_data
            .as_ref()
            .and_then(|p| p.incident_type.as_deref())
        {
            info!(incident, "assessing patient");
        }

        let report = assess(&request.vital_signs, conditions, source_confidence);
        info!(
            risk_score = report.risk.risk_score,
            protocol = %report.treatment_protocol,
            conditions = report.conditions.len(),
            "assessment complete"
        );
        report
    }
}

/// Score vitals and combine them with known conditions.
///
/// `source_confidence` is the confidence of whatever produced the
/// conditions; `None` when there was no image or finding at all.
pub fn assess(
    vitals: &VitalSigns,
    conditions: Vec<Condition>,
    source_confidence: Option<u8>,
) -> AnalysisReport {
    let risk = score(&normalize(vitals));
    let recommendations = recommend(&conditions, &risk);
    let immediate_actions = recommendations
        .iter()
        .filter(|r| r.priority == Priority::Immediate)
        .map(|r| r.action.clone())
        .collect();
    let treatment_protocol = classify_protocol(&conditions, &risk);
    let estimated_survival_rate = estimate_survival(&conditions, &risk);
    let overall_confidence = overall_confidence(source_confidence, risk.stability_index);

    AnalysisReport {
        risk,
        conditions,
        recommendations,
        immediate_actions,
        treatment_protocol,
        estimated_survival_rate,
        overall_confidence,
    }
}

/// Blend finding confidence with patient stability.
pub fn overall_confidence(source_confidence: Option<u8>, stability_index: u8) -> u8 {
    match source_confidence {
        Some(source) => {
            let sum = u16::from(source) + u16::from(stability_index);
            // round half up
            ((sum + 1) / 2) as u8
        }
        None => stability_index.max(50),
    }
}

fn mean_confidence(conditions: &[Condition]) -> u8 {
    let total: f64 = conditions.iter().map(|c| c.confidence).sum();
    let mean = total / conditions.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::imaging::{DemoImageAnalyzer, MockImageAnalyzer};
    use crate::models::{Severity, TreatmentProtocol};
    use test_case::test_case;

    fn stable_vitals() -> VitalSigns {
        VitalSigns::from_text("80", "120/80", "98", "16", "15")
    }

    #[test_case(Some(92), 50, 71)]
    #[test_case(Some(75), 100, 88)]
    #[test_case(Some(0), 0, 0)]
    #[test_case(None, 20, 50)]
    #[test_case(None, 80, 80)]
    fn blends_confidence(source: Option<u8>, stability: u8, expected: u8) {
        assert_eq!(overall_confidence(source, stability), expected);
    }

    #[test]
    fn stable_patient_without_findings() {
        let report = assess(&stable_vitals(), Vec::new(), None);

        assert_eq!(report.risk.risk_score, 0);
        assert_eq!(report.treatment_protocol, TreatmentProtocol::StandardEmergency);
        assert_eq!(report.estimated_survival_rate, 95.0);
        assert_eq!(report.overall_confidence, 100);
        assert!(report.immediate_actions.is_empty());
        assert_eq!(
            report.recommendations[0].action,
            "Continuous cardiac monitoring and pulse oximetry"
        );
    }

    #[test]
    fn image_findings_drive_the_report() {
        let assessor = Assessor::new(Arc::new(DemoImageAnalyzer));
        let request = AnalysisRequest {
            image_name: Some("tibia_fracture.jpg".into()),
            vital_signs: VitalSigns::from_text("142", "90/60", "92", "24", "15"),
            ..AnalysisRequest::default()
        };

        let report = assessor.analyze(&request);

        assert_eq!(report.risk.risk_score, 50);
        assert_eq!(report.conditions.len(), 3);
        assert_eq!(report.treatment_protocol, TreatmentProtocol::TraumaTeamActivation);
        assert_eq!(
            report.immediate_actions,
            vec![
                "Activate trauma team - Level 1 response".to_string(),
                "Secure IV access - two large bore (14-16G) lines".to_string(),
            ]
        );
        // 95 - 15 - 8 - 3 - 50 * 0.3
        assert!((report.estimated_survival_rate - 54.0).abs() < 1e-9);
        assert_eq!(report.overall_confidence, 71);
    }

    #[test]
    fn supplied_conditions_skip_image_analysis() {
        let mut analyzer = MockImageAnalyzer::new();
        analyzer.expect_analyze().never();
        let assessor = Assessor::new(Arc::new(analyzer));

        let request = AnalysisRequest {
            image_name: Some("wound.jpg".into()),
            vital_signs: stable_vitals(),
            conditions: vec![
                Condition::new("Deep laceration", 90.0, Severity::High),
                Condition::new("Foreign body presence", 71.0, Severity::Moderate),
            ],
            ..AnalysisRequest::default()
        };

        let report = assessor.analyze(&request);
        assert_eq!(report.conditions, request.conditions);
        // mean confidence 81 (80.5 rounded), stability 100
        assert_eq!(report.overall_confidence, 91);
    }

    #[test]
    fn analyzer_receives_the_image_name() {
        let mut analyzer = MockImageAnalyzer::new();
        analyzer
            .expect_analyze()
            .withf(|name| name.to_string() == "scan.png")
            .times(1)
            .returning(|_| ImageAnalysis {
                conditions: vec![Condition::new("Minor contusion", 65.0, Severity::Low)],
                confidence: 68,
            });
        let assessor = Assessor::new(Arc::new(analyzer));

        let request = AnalysisRequest {
            image_name: Some("scan.png".into()),
            vital_signs: stable_vitals(),
            ..AnalysisRequest::default()
        };
        let report = assessor.analyze(&request);

        assert_eq!(report.conditions.len(), 1);
        assert_eq!(report.overall_confidence, 84);
    }

    #[test]
    fn critical_risk_overrides_severity() {
        let vitals = VitalSigns::from_text("150", "70/40", "80", "16", "15");
        let conditions = vec![Condition::new("Internal bleeding", 79.0, Severity::Critical)];

        let report = assess(&vitals, conditions, Some(79));

        assert_eq!(report.risk.risk_score, 90);
        assert_eq!(
            report.treatment_protocol,
            TreatmentProtocol::AdvancedTraumaLifeSupport
        );
        assert_eq!(report.immediate_actions.len(), 3);
    }

    #[test]
    fn identical_requests_give_identical_reports() {
        let assessor = Assessor::new(Arc::new(DemoImageAnalyzer));
        let request = AnalysisRequest {
            image_name: Some("burn.jpg".into()),
            vital_signs: VitalSigns::from_text("130", "85/50", "90", "28", "12"),
            ..AnalysisRequest::default()
        };
        assert_eq!(assessor.analyze(&request), assessor.analyze(&request));
    }
}
