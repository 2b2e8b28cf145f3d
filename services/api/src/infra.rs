use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use loanbridge::workflows::discovery::{
    AssessmentConfig, Industry, ProfileId, SessionError, SessionRecord, SessionStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session store backing the service process. Sessions live only as long as
/// the process; restarting the server forgets every discovery flow.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<ProfileId, SessionRecord>>>,
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.profile.profile_id) {
            return Err(SessionError::Conflict);
        }
        guard.insert(record.profile.profile_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), SessionError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.profile.profile_id) {
            guard.insert(record.profile.profile_id.clone(), record);
            Ok(())
        } else {
            Err(SessionError::NotFound)
        }
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<SessionRecord>, SessionError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn active(&self, limit: usize) -> Result<Vec<SessionRecord>, SessionError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

pub(crate) fn default_assessment_config() -> AssessmentConfig {
    AssessmentConfig::default()
}

pub(crate) fn parse_industry(raw: &str) -> Result<Industry, String> {
    match raw.trim().to_lowercase().as_str() {
        "retail" => Ok(Industry::Retail),
        "food" => Ok(Industry::Food),
        "services" => Ok(Industry::Services),
        "manufacturing" => Ok(Industry::Manufacturing),
        "agriculture" => Ok(Industry::Agriculture),
        "crafts" => Ok(Industry::Crafts),
        "technology" => Ok(Industry::Technology),
        "other" => Ok(Industry::Other),
        other => Err(format!(
            "unknown industry '{other}' (expected retail, food, services, manufacturing, \
             agriculture, crafts, technology, or other)"
        )),
    }
}
