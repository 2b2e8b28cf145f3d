use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::discovery::consent::ConsentGuard;
use crate::workflows::discovery::domain::{
    AlternativeSignals, BusinessProfile, Industry, PrivacyConsent, ProfileId, ProfileSubmission,
    VisaPayload,
};
use crate::workflows::discovery::repository::{SessionError, SessionRecord, SessionStore};
use crate::workflows::discovery::{
    discovery_router, AssessmentConfig, LoanDiscoveryService, RiskEngine, VisaLookupSimulator,
};

/// The year every deterministic test pins itself to.
pub(super) const TEST_YEAR: i32 = 2024;

pub(super) fn full_consent() -> PrivacyConsent {
    PrivacyConsent {
        data_processing: true,
        visa_lookup: true,
        alternative_data: true,
        data_sharing: false,
    }
}

pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        name: "Amara's Kitchen".to_string(),
        owner_name: "Amara Diallo".to_string(),
        location: "Dakar, Senegal".to_string(),
        industry: Industry::Food,
        year_established: Some("2020".to_string()),
        monthly_revenue: Some("3000".to_string()),
        registration_number: None,
        employee_count: Some("4".to_string()),
        signals: AlternativeSignals::default(),
        consent: full_consent(),
    }
}

pub(super) fn submission_for(industry: Industry, monthly_revenue: &str) -> ProfileSubmission {
    let mut submission = submission();
    submission.industry = industry;
    submission.monthly_revenue = Some(monthly_revenue.to_string());
    submission
}

pub(super) fn no_consent_submission() -> ProfileSubmission {
    let mut submission = submission();
    submission.consent = PrivacyConsent::default();
    submission
}

pub(super) fn profile(industry: Industry, monthly_revenue: &str) -> BusinessProfile {
    guard()
        .profile_from_submission(submission_for(industry, monthly_revenue), TEST_YEAR)
        .expect("consented submission sanitizes")
}

pub(super) fn visa_payload(account_age_years: u8, risk_score: f32) -> VisaPayload {
    VisaPayload {
        merchant_id: "VM-test".to_string(),
        monthly_volume: 2100,
        transaction_count: 120,
        merchant_category: "5812".to_string(),
        account_age_years,
        risk_score,
    }
}

pub(super) fn guard() -> ConsentGuard {
    ConsentGuard
}

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(AssessmentConfig::default())
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<ProfileId, SessionRecord>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.profile.profile_id) {
            return Err(SessionError::Conflict);
        }
        guard.insert(record.profile.profile_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), SessionError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.profile.profile_id) {
            guard.insert(record.profile.profile_id.clone(), record);
            Ok(())
        } else {
            Err(SessionError::NotFound)
        }
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<SessionRecord>, SessionError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn active(&self, limit: usize) -> Result<Vec<SessionRecord>, SessionError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ProfileId) -> Result<Option<SessionRecord>, SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn active(&self, _limit: usize) -> Result<Vec<SessionRecord>, SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service() -> (LoanDiscoveryService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::default();
    let service = LoanDiscoveryService::new(
        Arc::new(store.clone()),
        AssessmentConfig::default(),
        VisaLookupSimulator::new(Duration::ZERO),
    );
    (service, store)
}

pub(super) fn discovery_router_with_service(
    service: LoanDiscoveryService<MemoryStore>,
) -> axum::Router {
    discovery_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
