use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Severity of a detected injury or finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[serde(alias = "medium")]
    Moderate,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Injury category, decided once when the condition is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionCategory {
    Fracture,
    Laceration,
    Burn,
    Hemorrhage,
    HeadInjury,
    InternalInjury,
    SoftTissue,
    Other,
}

impl ConditionCategory {
    /// Derive a category from a free-text condition name.
    ///
    /// Fracture is checked first: any name mentioning a fracture is a
    /// fracture regardless of what else it says.
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

        if has(&["fracture"]) {
            ConditionCategory::Fracture
        } else if has(&["burn", "thermal"]) {
            ConditionCategory::Burn
        } else if has(&["laceration", "incision", "wound"]) {
            ConditionCategory::Laceration
        } else if has(&["bleeding", "hemorrhage", "haemorrhage"]) {
            if has(&["internal"]) {
                ConditionCategory::InternalInjury
            } else {
                ConditionCategory::Hemorrhage
            }
        } else if has(&["head", "brain", "skull"]) {
            ConditionCategory::HeadInjury
        } else if has(&["organ", "internal"]) {
            ConditionCategory::InternalInjury
        } else if has(&["soft tissue", "contusion", "bruise"]) {
            ConditionCategory::SoftTissue
        } else {
            ConditionCategory::Other
        }
    }
}

/// A detected injury or finding, as produced by image analysis or supplied
/// by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", from = "ConditionRecord")]
pub struct Condition {
    pub name: String,
    /// Percentage, 0-100.
    #[validate(range(min = 0.0, max = 100.0))]
    pub confidence: f64,
    pub severity: Severity,
    pub category: ConditionCategory,
    pub body_region: Option<String>,
}

impl Condition {
    pub fn new(name: impl Into<String>, confidence: f64, severity: Severity) -> Self {
        let name = name.into();
        Self {
            category: ConditionCategory::classify(&name),
            name,
            confidence,
            severity,
            body_region: None,
        }
    }

    pub fn with_body_region(mut self, region: impl Into<String>) -> Self {
        self.body_region = Some(region.into());
        self
    }

    pub fn with_category(mut self, category: ConditionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Wire shape of a condition; the category may be omitted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionRecord {
    name: String,
    confidence: f64,
    severity: Severity,
    #[serde(default)]
    category: Option<ConditionCategory>,
    #[serde(default)]
    body_region: Option<String>,
}

impl From<ConditionRecord> for Condition {
    fn from(record: ConditionRecord) -> Self {
        let category = record
            .category
            .unwrap_or_else(|| ConditionCategory::classify(&record.name));
        Self {
            name: record.name,
            confidence: record.confidence,
            severity: record.severity,
            category,
            body_region: record.body_region,
        }
    }
}
