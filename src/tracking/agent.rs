//! Emergency response agent workflow.
//!
//! The workflow is a fixed list of scheduled steps. Each step says how long
//! to wait after the previous one and how the agent state changes. Applying
//! a step is pure; [`run_workflow`] is the only part that sleeps.

use std::time::Duration;

use tracing::{info, instrument, warn};

use super::store::{CaseEvent, SharedCaseStore};
use crate::models::{AgentState, AgentStatus, Location, NearestHospital};

#[derive(Debug, Clone, PartialEq)]
pub struct AgentStep {
    /// Wait before this step, counted from the previous one.
    pub delay: Duration,
    pub status: AgentStatus,
    pub progress: u8,
    pub message: String,
    pub current_action: Option<String>,
    pub location: Option<Location>,
    pub nearest_hospital: Option<NearestHospital>,
}

impl AgentStep {
    fn new(delay: Duration, status: AgentStatus, progress: u8, message: &str) -> Self {
        Self {
            delay,
            status,
            progress,
            message: message.to_string(),
            current_action: None,
            location: None,
            nearest_hospital: None,
        }
    }

    /// Next agent state. Location and hospital carry over unless this step
    /// provides new ones.
    pub fn apply(&self, state: &AgentState) -> AgentState {
        AgentState {
            status: self.status,
            message: self.message.clone(),
            current_action: self
                .current_action
                .clone()
                .or_else(|| state.current_action.clone()),
            progress: self.progress.max(state.progress),
            location: self.location.clone().or_else(|| state.location.clone()),
            nearest_hospital: self
                .nearest_hospital
                .clone()
                .or_else(|| state.nearest_hospital.clone()),
        }
    }
}

/// The standard response plan: analyze, locate, notify, then monitor.
pub fn standard_workflow(step_delay: Duration, final_delay: Duration) -> Vec<AgentStep> {
    let analyzing = AgentStatus::Analyzing;

    let mut locate = AgentStep::new(step_delay, analyzing, 60, "Locating nearest trauma centers...");
    locate.location = Some(Location {
        latitude: 28.6139,
        longitude: 77.2090,
        accuracy: 15.0,
        address: Some("Ring Road, Delhi".to_string()),
    });

    let mut notify = AgentStep::new(step_delay, analyzing, 90, "Notifying nearest trauma center...");
    notify.nearest_hospital = Some(NearestHospital {
        name: "AIIMS Delhi".to_string(),
        distance: "4.2 km".to_string(),
        eta: "12 min".to_string(),
        notified: true,
        or_status: "Preparing".to_string(),
    });

    let mut complete = AgentStep::new(
        final_delay,
        AgentStatus::Complete,
        100,
        "Emergency response coordinated",
    );
    complete.current_action = Some("Monitoring patient status during transport".to_string());

    vec![
        AgentStep::new(Duration::ZERO, analyzing, 10, "Analyzing patient data and images..."),
        AgentStep::new(step_delay, analyzing, 30, "Analyzing images using medical AI models..."),
        locate,
        notify,
        complete,
    ]
}

/// Fold a plan into the state it ends in, without waiting.
pub fn final_state(steps: &[AgentStep]) -> AgentState {
    steps
        .iter()
        .fold(AgentState::default(), |state, step| step.apply(&state))
}

/// Play the plan for one case against the shared store.
///
/// Stops early if the case disappears from the store (evicted) or the store
/// rejects an update.
#[instrument(skip(store, steps))]
pub async fn run_workflow(store: SharedCaseStore, case_id: String, steps: Vec<AgentStep>) {
    for step in steps {
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }

        let mut store = store.lock().await;
        let Some(current) = store.agent(&case_id).cloned() else {
            warn!("case no longer tracked, stopping agent");
            return;
        };
        let next = step.apply(&current);

        if let Some(hospital) = &step.nearest_hospital {
            if let Err(err) = store.apply(CaseEvent::HospitalAssigned {
                id: case_id.clone(),
                hospital: hospital.name.clone(),
            }) {
                warn!(error = %err, "could not assign hospital");
                return;
            }
        }

        if let Err(err) = store.apply(CaseEvent::AgentProgressed {
            id: case_id.clone(),
            agent: next,
        }) {
            warn!(error = %err, "agent update rejected");
            return;
        }
    }
    info!("agent workflow finished");
}
