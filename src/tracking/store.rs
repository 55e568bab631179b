//! Case store.
//!
//! All changes go through [`CaseStore::apply`], which takes one
//! [`CaseEvent`] and either updates the store or rejects the event. Time and
//! randomness only enter through [`CaseStore::register`], via the injected
//! clock and RNG.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::clock::Clock;
use crate::error::{Result, TriageError};
use crate::models::{AgentState, CaseStatus, PatientDetails, PatientTrackingInfo};

/// Store shared between request handlers and background workflows.
pub type SharedCaseStore = Arc<Mutex<CaseStore>>;

const MAX_ID_ATTEMPTS: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum CaseEvent {
    Registered(PatientTrackingInfo),
    StatusChanged { id: String, status: CaseStatus },
    HospitalAssigned { id: String, hospital: String },
    AgentProgressed { id: String, agent: AgentState },
}

impl CaseEvent {
    fn case_id(&self) -> &str {
        match self {
            CaseEvent::Registered(case) => &case.id,
            CaseEvent::StatusChanged { id, .. }
            | CaseEvent::HospitalAssigned { id, .. }
            | CaseEvent::AgentProgressed { id, .. } => id,
        }
    }
}

pub struct CaseStore {
    /// Newest first.
    cases: VecDeque<PatientTrackingInfo>,
    agents: HashMap<String, AgentState>,
    capacity: usize,
    prefix: String,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl CaseStore {
    pub fn new(capacity: usize, prefix: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(capacity, prefix, clock, StdRng::from_entropy())
    }

    pub fn with_rng(
        capacity: usize,
        prefix: impl Into<String>,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            cases: VecDeque::with_capacity(capacity),
            agents: HashMap::new(),
            capacity: capacity.max(1),
            prefix: prefix.into(),
            clock,
            rng,
        }
    }

    pub fn shared(self) -> SharedCaseStore {
        Arc::new(Mutex::new(self))
    }

    /// Open a new case for the given patient.
    #[instrument(skip_all)]
    pub fn register(&mut self, details: &PatientDetails) -> Result<PatientTrackingInfo> {
        let added_at = self.clock.now();
        let id = self.next_case_id(added_at.year())?;

        let case = PatientTrackingInfo {
            id,
            gender: details.gender.clone(),
            age: details.estimated_age.clone(),
            incident_type: details.incident_type.clone(),
            location: details.location.clone(),
            added_at,
            status: CaseStatus::Processing,
            hospital: None,
        };
        self.apply(CaseEvent::Registered(case)).cloned()
    }

    /// Apply one event and return the affected case.
    #[instrument(skip(self), fields(case_id = event.case_id()))]
    pub fn apply(&mut self, event: CaseEvent) -> Result<&PatientTrackingInfo> {
        match event {
            CaseEvent::Registered(case) => {
                if self.position(&case.id).is_some() {
                    return Err(TriageError::InvalidRequest(format!(
                        "case {} already exists",
                        case.id
                    )));
                }
                info!(case_id = %case.id, "case registered");
                self.agents.insert(case.id.clone(), AgentState::default());
                self.cases.push_front(case);
                self.evict_oldest();
                Ok(&self.cases[0])
            }
            CaseEvent::StatusChanged { id, status } => {
                let case = self.case_mut(&id)?;
                if case.status.next() != Some(status) {
                    return Err(TriageError::InvalidTransition {
                        from: case.status,
                        to: status,
                    });
                }
                info!(from = case.status.as_str(), to = status.as_str(), "case status changed");
                case.status = status;
                Ok(case)
            }
            CaseEvent::HospitalAssigned { id, hospital } => {
                let case = self.case_mut(&id)?;
                info!(%hospital, "hospital assigned");
                case.hospital = Some(hospital);
                Ok(case)
            }
            CaseEvent::AgentProgressed { id, agent } => {
                let index = self
                    .position(&id)
                    .ok_or_else(|| TriageError::CaseNotFound(id.clone()))?;
                let current = self.agents.entry(id).or_default();
                if agent.progress < current.progress {
                    return Err(TriageError::InvalidRequest(format!(
                        "agent progress cannot go back from {} to {}",
                        current.progress, agent.progress
                    )));
                }
                debug!(progress = agent.progress, message = %agent.message, "agent progressed");
                *current = agent;
                Ok(&self.cases[index])
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&PatientTrackingInfo> {
        self.position(id).map(|i| &self.cases[i])
    }

    pub fn agent(&self, id: &str) -> Option<&AgentState> {
        self.agents.get(id)
    }

    /// Recently registered cases, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &PatientTrackingInfo> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.id == id)
    }

    fn case_mut(&mut self, id: &str) -> Result<&mut PatientTrackingInfo> {
        self.cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TriageError::CaseNotFound(id.to_string()))
    }

    fn evict_oldest(&mut self) {
        while self.cases.len() > self.capacity {
            if let Some(evicted) = self.cases.pop_back() {
                debug!(case_id = %evicted.id, "evicting oldest case");
                self.agents.remove(&evicted.id);
            }
        }
    }

    /// `<prefix>-<year>-<NNNN>`, unique among stored cases.
    fn next_case_id(&mut self, year: i32) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let number: u16 = self.rng.gen_range(1000..=9999);
            let id = format!("{}-{}-{}", self.prefix, year, number);
            if self.position(&id).is_none() {
                return Ok(id);
            }
        }
        Err(TriageError::InvalidRequest(
            "could not allocate a free case number".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::clock::MockClock;
    use chrono::{TimeZone, Utc};

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap());
        Arc::new(clock)
    }

    fn store(capacity: usize) -> CaseStore {
        CaseStore::with_rng(capacity, "TR", fixed_clock(), StdRng::seed_from_u64(7))
    }

    fn details(incident: &str) -> PatientDetails {
        PatientDetails {
            incident_type: Some(incident.to_string()),
            gender: Some("female".to_string()),
            estimated_age: Some("30-40".to_string()),
            ..PatientDetails::default()
        }
    }

    #[test]
    fn registers_with_clock_year_and_four_digits() {
        let mut store = store(5);
        let case = store.register(&details("Fall")).unwrap();

        assert!(case.id.starts_with("TR-2026-"));
        let number: u16 = case.id.rsplit('-').next().unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&number));
        assert_eq!(case.status, CaseStatus::Processing);
        assert_eq!(case.age.as_deref(), Some("30-40"));
        assert_eq!(case.added_at, Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap());
        assert_eq!(store.agent(&case.id), Some(&AgentState::default()));
    }

    #[test]
    fn recent_list_is_newest_first_and_bounded() {
        let mut store = store(3);
        let ids: Vec<String> = (0..5)
            .map(|i| store.register(&details(&format!("incident {}", i))).unwrap().id)
            .collect();

        let recent: Vec<&str> = store.recent().map(|c| c.id.as_str()).collect();
        assert_eq!(recent, vec![ids[4].as_str(), ids[3].as_str(), ids[2].as_str()]);
        assert!(store.get(&ids[0]).is_none());
        assert!(store.agent(&ids[0]).is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn status_only_moves_one_step_forward() {
        let mut store = store(5);
        let id = store.register(&details("Vehicle collision")).unwrap().id;

        let skip = store.apply(CaseEvent::StatusChanged {
            id: id.clone(),
            status: CaseStatus::Hospital,
        });
        assert!(matches!(
            skip,
            Err(TriageError::InvalidTransition {
                from: CaseStatus::Processing,
                to: CaseStatus::Hospital
            })
        ));

        for status in [CaseStatus::Transferring, CaseStatus::Hospital, CaseStatus::Complete] {
            let case = store
                .apply(CaseEvent::StatusChanged {
                    id: id.clone(),
                    status,
                })
                .unwrap();
            assert_eq!(case.status, status);
        }

        let back = store.apply(CaseEvent::StatusChanged {
            id,
            status: CaseStatus::Processing,
        });
        assert!(back.is_err());
    }

    #[test]
    fn unknown_case_is_reported() {
        let mut store = store(5);
        let result = store.apply(CaseEvent::HospitalAssigned {
            id: "TR-2026-0001".into(),
            hospital: "AIIMS Delhi".into(),
        });
        assert!(matches!(result, Err(TriageError::CaseNotFound(id)) if id == "TR-2026-0001"));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut store = store(5);
        let case = store.register(&details("Fall")).unwrap();
        assert!(store.apply(CaseEvent::Registered(case)).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn agent_progress_never_goes_back() {
        let mut store = store(5);
        let id = store.register(&details("Fall")).unwrap().id;

        let ahead = AgentState {
            progress: 60,
            ..AgentState::default()
        };
        store
            .apply(CaseEvent::AgentProgressed {
                id: id.clone(),
                agent: ahead,
            })
            .unwrap();

        let behind = AgentState {
            progress: 30,
            ..AgentState::default()
        };
        assert!(store
            .apply(CaseEvent::AgentProgressed {
                id: id.clone(),
                agent: behind,
            })
            .is_err());
        assert_eq!(store.agent(&id).map(|a| a.progress), Some(60));
    }

    #[test]
    fn same_seed_gives_same_ids() {
        let mut a = store(5);
        let mut b = store(5);
        assert_eq!(
            a.register(&details("Fall")).unwrap().id,
            b.register(&details("Fall")).unwrap().id
        );
    }
}
