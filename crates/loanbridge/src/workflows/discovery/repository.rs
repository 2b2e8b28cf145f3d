use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::assessment::RiskAssessment;
use super::domain::{BusinessProfile, DiscoveryStage, ProfileId};
use super::plan::ImprovementTask;

/// Session-scoped record for one discovery flow. State lives only in memory
/// for the duration of the session; there is deliberately no durable store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub profile: BusinessProfile,
    /// Bumped on every profile change; delayed lookups compare it to detect
    /// that their snapshot was superseded mid-flight.
    pub revision: u64,
    pub assessment: Option<RiskAssessment>,
    pub selected_product: Option<String>,
    pub plan: Option<Vec<ImprovementTask>>,
    /// UI-local completion marks. Never written back to the profile and
    /// never regenerated into the plan itself.
    pub completed_tasks: BTreeSet<String>,
}

impl SessionRecord {
    pub fn new(profile: BusinessProfile) -> Self {
        Self {
            profile,
            revision: 0,
            assessment: None,
            selected_product: None,
            plan: None,
            completed_tasks: BTreeSet::new(),
        }
    }

    pub fn stage(&self) -> DiscoveryStage {
        if self.selected_product.is_some() {
            DiscoveryStage::ProductSelected
        } else if self.assessment.is_some() {
            DiscoveryStage::Assessed
        } else {
            DiscoveryStage::ProfileCaptured
        }
    }

    pub fn status_view(&self) -> SessionStatusView {
        SessionStatusView {
            profile_id: self.profile.profile_id.clone(),
            stage: self.stage().label(),
            business_name: self.profile.name.clone(),
            has_visa_merchant: self.profile.has_visa_merchant(),
            overall_score: self
                .assessment
                .as_ref()
                .map(|assessment| assessment.overall_score),
            selected_product: self.selected_product.clone(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
/// Hosts provide the in-memory implementation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionError>;
    fn update(&self, record: SessionRecord) -> Result<(), SessionError>;
    fn fetch(&self, id: &ProfileId) -> Result<Option<SessionRecord>, SessionError>;
    fn active(&self, limit: usize) -> Result<Vec<SessionRecord>, SessionError>;
}

/// Error enumeration for session-store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a session's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusView {
    pub profile_id: ProfileId,
    pub stage: &'static str,
    pub business_name: String,
    pub has_visa_merchant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_product: Option<String>,
}
