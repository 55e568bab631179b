//! API module for the triage service
//!
//! This module contains all HTTP-related functionality.

use std::sync::Arc;

use crate::config::Config;
use crate::scoring::{Assessor, DemoImageAnalyzer};
use crate::tracking::{standard_workflow, AgentStep, CaseStore, SharedCaseStore, SystemClock};

pub mod handlers;
pub mod routes;

pub use routes::configure;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub assessor: Assessor,
    pub cases: SharedCaseStore,
    /// Response plan started for every new case.
    pub workflow: Arc<Vec<AgentStep>>,
}

impl AppState {
    /// Production wiring: demo image analysis, system clock, configured plan.
    pub fn from_config(config: &Config) -> Self {
        let cases = CaseStore::new(
            config.tracking.recent_capacity,
            config.tracking.case_prefix.clone(),
            Arc::new(SystemClock),
        );
        let workflow = standard_workflow(config.agent.step_delay(), config.agent.final_delay());
        Self::new(
            Assessor::new(Arc::new(DemoImageAnalyzer)),
            cases.shared(),
            workflow,
        )
    }

    pub fn new(assessor: Assessor, cases: SharedCaseStore, workflow: Vec<AgentStep>) -> Self {
        Self {
            assessor,
            cases,
            workflow: Arc::new(workflow),
        }
    }
}
