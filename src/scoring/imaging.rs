//! Injury image analysis.
//!
//! There is no vision model behind this. `DemoImageAnalyzer` returns canned
//! findings chosen by keywords in the image file name, which is enough to
//! drive demos and the rest of the pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Condition, Severity};

/// Findings for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub conditions: Vec<Condition>,
    /// Overall confidence of the analysis, 0-100.
    pub confidence: u8,
}

impl ImageAnalysis {
    pub fn empty() -> Self {
        Self {
            conditions: Vec::new(),
            confidence: 0,
        }
    }
}

/// Source of detected conditions for an injury image.
#[cfg_attr(test, mockall::automock)]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyze the image stored under the given file name.
    fn analyze(&self, image_name: &str) -> ImageAnalysis;
}

/// Keyword-driven analyzer used by the demo deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoImageAnalyzer;

impl ImageAnalyzer for DemoImageAnalyzer {
    fn analyze(&self, image_name: &str) -> ImageAnalysis {
        let name = image_name.to_lowercase();

        let (findings, confidence): (&[Finding], u8) = if name.contains("fracture") {
            (&FRACTURE[..], 92)
        } else if name.contains("wound") {
            (&WOUND[..], 89)
        } else if name.contains("burn") {
            (&BURN[..], 86)
        } else if name.contains("trauma") {
            (&TRAUMA[..], 90)
        } else {
            (&UNSPECIFIED[..], 75)
        };

        debug!(image = %name, findings = findings.len(), confidence, "demo image analysis");

        ImageAnalysis {
            conditions: findings.iter().map(Finding::to_condition).collect(),
            confidence,
        }
    }
}

struct Finding {
    name: &'static str,
    confidence: u8,
    severity: Severity,
    body_region: &'static str,
}

impl Finding {
    fn to_condition(&self) -> Condition {
        Condition::new(self.name, f64::from(self.confidence), self.severity)
            .with_body_region(self.body_region)
    }
}

const fn finding(
    name: &'static str,
    confidence: u8,
    severity: Severity,
    body_region: &'static str,
) -> Finding {
    Finding {
        name,
        confidence,
        severity,
        body_region,
    }
}

static FRACTURE: [Finding; 3] = [
    finding("Compound fracture - tibia", 94, Severity::Critical, "lower extremity"),
    finding("Bone displacement", 89, Severity::High, "lower extremity"),
    finding("Soft tissue damage", 76, Severity::Moderate, "soft tissue"),
];

static WOUND: [Finding; 3] = [
    finding("Deep laceration", 91, Severity::High, "soft tissue"),
    finding("Arterial bleeding", 87, Severity::Critical, "circulatory"),
    finding("Foreign body presence", 73, Severity::Moderate, "soft tissue"),
];

static BURN: [Finding; 3] = [
    finding("Third-degree burns", 88, Severity::Critical, "integumentary"),
    finding("Thermal injury", 85, Severity::High, "integumentary"),
    finding("Inhalation injury risk", 67, Severity::High, "respiratory"),
];

static TRAUMA: [Finding; 3] = [
    finding("Multiple trauma injuries", 93, Severity::Critical, "multiple"),
    finding("Internal bleeding", 79, Severity::Critical, "circulatory"),
    finding("Possible organ damage", 71, Severity::High, "abdomen"),
];

static UNSPECIFIED: [Finding; 2] = [
    finding("Unspecified injury", 70, Severity::Moderate, "unspecified"),
    finding("Soft tissue trauma", 65, Severity::Moderate, "soft tissue"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConditionCategory;
    use test_case::test_case;

    #[test_case("leg_fracture.jpg", 92, "Compound fracture - tibia")]
    #[test_case("Open-Wound.png", 89, "Deep laceration")]
    #[test_case("burn_case_2.jpg", 86, "Third-degree burns")]
    #[test_case("trauma.jpeg", 90, "Multiple trauma injuries")]
    #[test_case("IMG_0042.jpg", 75, "Unspecified injury")]
    fn picks_findings_by_file_name(name: &str, confidence: u8, first: &str) {
        let analysis = DemoImageAnalyzer.analyze(name);
        assert_eq!(analysis.confidence, confidence);
        assert_eq!(analysis.conditions[0].name, first);
    }

    #[test]
    fn fracture_keyword_wins_over_later_keywords() {
        let analysis = DemoImageAnalyzer.analyze("burn_and_fracture.jpg");
        assert_eq!(analysis.confidence, 92);
        assert_eq!(analysis.conditions[0].category, ConditionCategory::Fracture);
        assert_eq!(
            analysis.conditions[0].body_region.as_deref(),
            Some("lower extremity")
        );
    }
}
