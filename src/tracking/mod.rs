//! Case tracking: the recent-patients list and the response agent state of
//! each case.

pub mod agent;
pub mod clock;
pub mod store;

pub use agent::{run_workflow, standard_workflow, AgentStep};
pub use clock::{Clock, SystemClock};
pub use store::{CaseEvent, CaseStore, SharedCaseStore};
