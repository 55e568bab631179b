use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incident details captured on the patient form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDetails {
    pub gender: Option<String>,
    pub estimated_age: Option<String>,
    pub incident_type: Option<String>,
    pub incident_details: Option<String>,
    pub location: Option<String>,
}

/// A tracked emergency case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientTrackingInfo {
    pub id: String,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub incident_type: Option<String>,
    pub location: Option<String>,
    pub added_at: DateTime<Utc>,
    pub status: CaseStatus,
    pub hospital: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Processing,
    Transferring,
    Hospital,
    Complete,
}

impl CaseStatus {
    /// The only status a case may move to from this one.
    pub fn next(self) -> Option<CaseStatus> {
        match self {
            CaseStatus::Processing => Some(CaseStatus::Transferring),
            CaseStatus::Transferring => Some(CaseStatus::Hospital),
            CaseStatus::Hospital => Some(CaseStatus::Complete),
            CaseStatus::Complete => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Processing => "processing",
            CaseStatus::Transferring => "transferring",
            CaseStatus::Hospital => "hospital",
            CaseStatus::Complete => "complete",
        }
    }
}
