use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Analyzing,
    Processing,
    Complete,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres.
    pub accuracy: f64,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestHospital {
    pub name: String,
    pub distance: String,
    pub eta: String,
    pub notified: bool,
    pub or_status: String,
}

/// Progress of the emergency response agent for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub status: AgentStatus,
    pub message: String,
    pub current_action: Option<String>,
    /// 0-100, never decreases.
    pub progress: u8,
    pub location: Option<Location>,
    pub nearest_hospital: Option<NearestHospital>,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            status: AgentStatus::Idle,
            message: "Ready to begin assessment".to_string(),
            current_action: None,
            progress: 0,
            location: None,
            nearest_hospital: None,
        }
    }
}
