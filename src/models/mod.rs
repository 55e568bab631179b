//! Data models shared by the scoring core, case tracking and the API.

pub mod agent;
pub mod assessment;
pub mod condition;
pub mod patient;
pub mod vitals;

pub use agent::{AgentState, AgentStatus, Location, NearestHospital};
pub use assessment::{AnalysisReport, Priority, Recommendation, RiskAssessment, TreatmentProtocol};
pub use condition::{Condition, ConditionCategory, Severity};
pub use patient::{CaseStatus, PatientDetails, PatientTrackingInfo};
pub use vitals::{NormalizedVitals, VitalSigns};
