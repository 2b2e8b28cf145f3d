use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::assessment::{AssessmentConfig, RiskAssessment, RiskEngine};
use super::catalog::{self, AdjustedLoanOffer, LoanProduct};
use super::consent::{ConsentGuard, ConsentViolation};
use super::domain::{ProfileId, ProfileSubmission, VisaPayload};
use super::plan::{self, ImprovementTask};
use super::projection::{self, ProjectionBundle};
use super::repository::{SessionError, SessionRecord, SessionStore};
use super::visa::VisaLookupSimulator;

/// Service composing the consent guard, session store, scoring engine, and
/// the mocked merchant lookup into the discovery pipeline.
pub struct LoanDiscoveryService<S> {
    guard: ConsentGuard,
    store: Arc<S>,
    engine: RiskEngine,
    simulator: VisaLookupSimulator,
    catalog: Vec<LoanProduct>,
}

static PROFILE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_profile_id() -> ProfileId {
    let id = PROFILE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProfileId(format!("biz-{id:06}"))
}

/// Result of a merchant lookup, whether or not an account was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaLookupOutcome {
    pub found: bool,
    pub visa: Option<VisaPayload>,
}

impl<S> LoanDiscoveryService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, config: AssessmentConfig, simulator: VisaLookupSimulator) -> Self {
        Self {
            guard: ConsentGuard,
            store,
            engine: RiskEngine::new(config),
            simulator,
            catalog: catalog::standard_catalog(),
        }
    }

    /// Validate a submission and open a new discovery session.
    pub fn submit(
        &self,
        submission: ProfileSubmission,
        current_year: i32,
    ) -> Result<SessionRecord, DiscoveryServiceError> {
        let mut profile = self.guard.profile_from_submission(submission, current_year)?;
        profile.profile_id = next_profile_id();

        let record = SessionRecord::new(profile);
        let stored = self.store.insert(record)?;
        info!(profile_id = %stored.profile.profile_id.0, "discovery session opened");
        Ok(stored)
    }

    /// Replace the profile of an existing session. Everything derived from
    /// the previous snapshot (assessment, plan, merchant payload, selection)
    /// is dropped so no stale view can survive the edit.
    pub fn resubmit(
        &self,
        id: &ProfileId,
        submission: ProfileSubmission,
        current_year: i32,
    ) -> Result<SessionRecord, DiscoveryServiceError> {
        let mut record = self.fetch(id)?;
        let mut profile = self.guard.profile_from_submission(submission, current_year)?;
        profile.profile_id = id.clone();

        record.profile = profile;
        record.revision += 1;
        record.assessment = None;
        record.selected_product = None;
        record.plan = None;
        record.completed_tasks.clear();

        self.store.update(record.clone())?;
        Ok(record)
    }

    /// Run the simulated merchant lookup for a session.
    ///
    /// The delayed computation re-reads the session after the latency window
    /// and evaluates against that snapshot, so a profile edited mid-flight is
    /// scored on its latest data rather than the one the lookup started with.
    pub async fn visa_lookup(
        &self,
        id: &ProfileId,
        current_year: i32,
    ) -> Result<VisaLookupOutcome, DiscoveryServiceError> {
        let record = self.fetch(id)?;
        self.guard.authorize_visa_lookup(&record.profile.consent)?;
        let started_revision = record.revision;
        drop(record);

        self.simulator.simulate_latency().await;

        let mut record = self.fetch(id)?;
        if record.revision != started_revision {
            warn!(
                profile_id = %id.0,
                "profile changed during merchant lookup; evaluating latest snapshot"
            );
        }

        let payload = VisaLookupSimulator::evaluate(&record.profile, current_year);
        let found = payload.is_some();

        // Read-modify-write: an edit landing between the refetch above and
        // the update below would be overwritten. Sessions have a single
        // owner, so concurrent writers on one profile are out of scope.
        if record.profile.visa != payload {
            record.profile.visa = payload.clone();
            record.revision += 1;
            record.assessment = None;
            self.store.update(record)?;
        }

        info!(profile_id = %id.0, found, "merchant lookup resolved");
        Ok(VisaLookupOutcome { found, visa: payload })
    }

    /// Score the current profile snapshot and cache the result on the
    /// session. A fresh call replaces any previous assessment.
    pub fn assess(
        &self,
        id: &ProfileId,
        current_year: i32,
    ) -> Result<RiskAssessment, DiscoveryServiceError> {
        let mut record = self.fetch(id)?;
        let assessment = self.engine.assess(&record.profile, current_year);
        record.assessment = Some(assessment.clone());
        self.store.update(record)?;
        Ok(assessment)
    }

    /// The catalog rewritten through the session's assessment.
    pub fn offers(
        &self,
        id: &ProfileId,
        current_year: i32,
    ) -> Result<Vec<AdjustedLoanOffer>, DiscoveryServiceError> {
        let record = self.fetch(id)?;
        let assessment = match record.assessment {
            Some(assessment) => assessment,
            None => self.assess(id, current_year)?,
        };
        let has_visa = self.fetch(id)?.profile.has_visa_merchant();
        Ok(catalog::adjust(&self.catalog, &assessment, has_visa))
    }

    /// Record which catalog product the owner picked.
    pub fn select_product(
        &self,
        id: &ProfileId,
        product_id: &str,
    ) -> Result<SessionRecord, DiscoveryServiceError> {
        if !self.catalog.iter().any(|product| product.id == product_id) {
            return Err(DiscoveryServiceError::UnknownProduct(product_id.to_string()));
        }

        let mut record = self.fetch(id)?;
        record.selected_product = Some(product_id.to_string());
        self.store.update(record.clone())?;
        Ok(record)
    }

    /// The improvement plan for the session, generated once per profile
    /// revision and reused afterwards.
    pub fn improvement_plan(
        &self,
        id: &ProfileId,
    ) -> Result<Vec<ImprovementTask>, DiscoveryServiceError> {
        let mut record = self.fetch(id)?;
        if record.plan.is_none() {
            record.plan = Some(plan::generate(&record.profile));
            self.store.update(record.clone())?;
        }

        Ok(record.plan.unwrap_or_default())
    }

    /// Mark a plan task done or not done. Session-local only; the profile is
    /// never touched.
    pub fn set_task_completion(
        &self,
        id: &ProfileId,
        title: &str,
        completed: bool,
    ) -> Result<SessionRecord, DiscoveryServiceError> {
        let tasks = self.improvement_plan(id)?;
        if !tasks.iter().any(|task| task.title == title) {
            return Err(DiscoveryServiceError::UnknownTask(title.to_string()));
        }

        let mut record = self.fetch(id)?;
        if completed {
            record.completed_tasks.insert(title.to_string());
        } else {
            record.completed_tasks.remove(title);
        }
        self.store.update(record.clone())?;
        Ok(record)
    }

    /// Fresh projection bundle for the dashboards; nothing is cached.
    pub fn projections(
        &self,
        id: &ProfileId,
        current_year: i32,
    ) -> Result<ProjectionBundle, DiscoveryServiceError> {
        let record = self.fetch(id)?;
        let assessment = match record.assessment {
            Some(ref assessment) => assessment.clone(),
            None => self.assess(id, current_year)?,
        };
        let record = self.fetch(id)?;
        Ok(projection::project(&assessment, &record.profile))
    }

    /// Fetch a session and current status for API responses.
    pub fn get(&self, id: &ProfileId) -> Result<SessionRecord, DiscoveryServiceError> {
        self.fetch(id)
    }

    pub fn catalog(&self) -> &[LoanProduct] {
        &self.catalog
    }

    fn fetch(&self, id: &ProfileId) -> Result<SessionRecord, DiscoveryServiceError> {
        Ok(self.store.fetch(id)?.ok_or(SessionError::NotFound)?)
    }
}

/// Error raised by the discovery service.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryServiceError {
    #[error(transparent)]
    Consent(#[from] ConsentViolation),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("unknown loan product '{0}'")]
    UnknownProduct(String),
    #[error("unknown improvement task '{0}'")]
    UnknownTask(String),
}
