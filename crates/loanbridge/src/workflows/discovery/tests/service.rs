use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::workflows::discovery::domain::{DiscoveryStage, Industry};
use crate::workflows::discovery::{
    AssessmentConfig, ConsentViolation, DiscoveryServiceError, LoanDiscoveryService, SessionError,
    VisaLookupSimulator,
};

#[test]
fn submit_opens_a_session_with_a_sequential_id() {
    let (service, _store) = build_service();

    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");

    let id = &record.profile.profile_id.0;
    assert!(id.starts_with("biz-"), "unexpected id format {id}");
    assert_eq!(id.len(), "biz-000001".len());
    assert_eq!(record.revision, 0);
    assert_eq!(record.stage(), DiscoveryStage::ProfileCaptured);
    assert!(record.assessment.is_none());
}

#[test]
fn submit_without_processing_consent_is_rejected() {
    let (service, _store) = build_service();

    let error = service
        .submit(no_consent_submission(), TEST_YEAR)
        .expect_err("consent is mandatory");

    assert!(matches!(
        error,
        DiscoveryServiceError::Consent(ConsentViolation::DataProcessingNotGranted)
    ));
}

#[tokio::test]
async fn visa_lookup_attaches_payload_and_invalidates_the_assessment() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    service.assess(&id, TEST_YEAR).expect("assessed");
    assert!(service.get(&id).expect("session").assessment.is_some());

    let outcome = service.visa_lookup(&id, TEST_YEAR).await.expect("lookup ran");

    assert!(outcome.found);
    let record = service.get(&id).expect("session");
    assert!(record.profile.has_visa_merchant());
    assert!(record.assessment.is_none(), "stale assessment must not survive");
    assert_eq!(record.revision, 1);
}

#[tokio::test]
async fn visa_lookup_requires_its_own_consent_flag() {
    let (service, _store) = build_service();
    let mut submission = submission();
    submission.consent.visa_lookup = false;
    let record = service.submit(submission, TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let error = service
        .visa_lookup(&id, TEST_YEAR)
        .await
        .expect_err("lookup must be gated");

    assert!(matches!(
        error,
        DiscoveryServiceError::Consent(ConsentViolation::VisaLookupNotAuthorized)
    ));
    assert!(service.get(&id).expect("session").profile.visa.is_none());
}

#[tokio::test]
async fn repeated_lookup_with_unchanged_profile_does_not_bump_the_revision() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    service.visa_lookup(&id, TEST_YEAR).await.expect("first lookup");
    let after_first = service.get(&id).expect("session").revision;
    service.visa_lookup(&id, TEST_YEAR).await.expect("second lookup");
    let after_second = service.get(&id).expect("session").revision;

    // Payload synthesis draws a fresh merchant id, so the second lookup does
    // replace it; what matters is that each attach is one revision step.
    assert_eq!(after_first, 1);
    assert_eq!(after_second, 2);
}

#[tokio::test(start_paused = true)]
async fn mid_flight_edit_is_scored_on_the_latest_snapshot() {
    let store = MemoryStore::default();
    let service = Arc::new(LoanDiscoveryService::new(
        Arc::new(store.clone()),
        AssessmentConfig::default(),
        VisaLookupSimulator::new(Duration::from_millis(1500)),
    ));

    let record = service
        .submit(submission_for(Industry::Food, "3000"), TEST_YEAR)
        .expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let lookup = tokio::spawn({
        let service = Arc::clone(&service);
        let id = id.clone();
        async move { service.visa_lookup(&id, TEST_YEAR).await }
    });
    // Let the lookup task enter its latency window before editing.
    tokio::task::yield_now().await;

    service
        .resubmit(&id, submission_for(Industry::Services, "400"), TEST_YEAR)
        .expect("edit accepted");

    let outcome = lookup.await.expect("lookup task").expect("lookup resolved");

    // The edited profile no longer qualifies, so the delayed lookup must not
    // attach the payload its original snapshot would have produced.
    assert!(!outcome.found);
    assert!(outcome.visa.is_none());
    assert!(service.get(&id).expect("session").profile.visa.is_none());
}

#[test]
fn resubmit_drops_every_derived_artifact() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    service.assess(&id, TEST_YEAR).expect("assessed");
    service.select_product(&id, "micro-loan").expect("selected");
    service.improvement_plan(&id).expect("planned");
    service
        .set_task_completion(&id, "Social Media Presence", true)
        .expect("task marked");

    let record = service
        .resubmit(&id, submission_for(Industry::Crafts, "900"), TEST_YEAR)
        .expect("edit accepted");

    assert_eq!(record.revision, 1);
    assert_eq!(record.profile.industry, Industry::Crafts);
    assert!(record.assessment.is_none());
    assert!(record.selected_product.is_none());
    assert!(record.plan.is_none());
    assert!(record.completed_tasks.is_empty());
    assert!(record.profile.visa.is_none());
    assert_eq!(record.stage(), DiscoveryStage::ProfileCaptured);
}

#[test]
fn offers_assess_on_demand_when_no_assessment_is_cached() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let offers = service.offers(&id, TEST_YEAR).expect("offers derived");

    assert_eq!(offers.len(), 3);
    let record = service.get(&id).expect("session");
    assert!(record.assessment.is_some(), "offers should cache the assessment");
    assert_eq!(record.stage(), DiscoveryStage::Assessed);
}

#[test]
fn selecting_an_unknown_product_fails() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let error = service
        .select_product(&id, "mega-loan")
        .expect_err("catalog is closed");

    assert!(matches!(error, DiscoveryServiceError::UnknownProduct(_)));
}

#[test]
fn selection_advances_the_stage() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    service.assess(&id, TEST_YEAR).expect("assessed");
    let record = service.select_product(&id, "growth-loan").expect("selected");

    assert_eq!(record.selected_product.as_deref(), Some("growth-loan"));
    assert_eq!(record.stage(), DiscoveryStage::ProductSelected);
}

#[test]
fn plan_is_generated_once_and_reused() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let first = service.improvement_plan(&id).expect("planned");
    let second = service.improvement_plan(&id).expect("planned again");

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn completing_an_unknown_task_fails() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let error = service
        .set_task_completion(&id, "Hire A Lobbyist", true)
        .expect_err("titles must come from the plan");

    assert!(matches!(error, DiscoveryServiceError::UnknownTask(_)));
}

#[test]
fn task_completion_toggles_without_touching_the_plan() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let plan = service.improvement_plan(&id).expect("planned");
    let title = plan[0].title.clone();

    let record = service.set_task_completion(&id, &title, true).expect("marked");
    assert!(record.completed_tasks.contains(&title));

    let record = service.set_task_completion(&id, &title, false).expect("unmarked");
    assert!(record.completed_tasks.is_empty());
    assert_eq!(record.plan.as_deref(), Some(plan.as_slice()));
}

#[test]
fn projections_are_derived_fresh_from_the_session() {
    let (service, _store) = build_service();
    let record = service.submit(submission(), TEST_YEAR).expect("submission accepted");
    let id = record.profile.profile_id.clone();

    let bundle = service.projections(&id, TEST_YEAR).expect("projected");

    assert_eq!(bundle.current_score, 705);
    assert_eq!(bundle.business_growth.current, 3000);
}

#[test]
fn store_outage_surfaces_as_a_session_error() {
    let service = LoanDiscoveryService::new(
        Arc::new(UnavailableStore),
        AssessmentConfig::default(),
        VisaLookupSimulator::new(Duration::ZERO),
    );

    let error = service
        .submit(submission(), TEST_YEAR)
        .expect_err("store is down");

    assert!(matches!(
        error,
        DiscoveryServiceError::Session(SessionError::Unavailable(_))
    ));
}
