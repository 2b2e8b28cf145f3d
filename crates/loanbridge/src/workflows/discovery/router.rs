use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{Datelike, Local};
use serde::Deserialize;
use serde_json::json;

use super::consent::ConsentViolation;
use super::domain::{ProfileId, ProfileSubmission};
use super::repository::{SessionError, SessionStore};
use super::service::{DiscoveryServiceError, LoanDiscoveryService};

/// Router builder exposing the discovery pipeline over JSON endpoints.
pub fn discovery_router<S>(service: Arc<LoanDiscoveryService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/discovery/profiles", post(submit_handler::<S>))
        .route(
            "/api/v1/discovery/profiles/:profile_id",
            get(status_handler::<S>).put(resubmit_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/visa-lookup",
            post(visa_lookup_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/assessment",
            get(assessment_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/offers",
            get(offers_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/selection",
            post(selection_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/plan",
            get(plan_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/plan/completion",
            put(completion_handler::<S>),
        )
        .route(
            "/api/v1/discovery/profiles/:profile_id/projections",
            get(projections_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct SelectionRequest {
    product_id: String,
}

#[derive(Debug, Deserialize)]
struct CompletionRequest {
    title: String,
    completed: bool,
}

fn current_year() -> i32 {
    Local::now().year()
}

fn error_response(error: DiscoveryServiceError) -> Response {
    let status = match &error {
        DiscoveryServiceError::Consent(ConsentViolation::DataProcessingNotGranted)
        | DiscoveryServiceError::Consent(ConsentViolation::VisaLookupNotAuthorized) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DiscoveryServiceError::Session(SessionError::NotFound)
        | DiscoveryServiceError::UnknownProduct(_)
        | DiscoveryServiceError::UnknownTask(_) => StatusCode::NOT_FOUND,
        DiscoveryServiceError::Session(SessionError::Conflict) => StatusCode::CONFLICT,
        DiscoveryServiceError::Session(SessionError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

async fn submit_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.submit(submission, current_year()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

async fn resubmit_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.resubmit(&id, submission, current_year()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

async fn status_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

async fn visa_lookup_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.visa_lookup(&id, current_year()).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn assessment_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.assess(&id, current_year()) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn offers_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.offers(&id, current_year()) {
        Ok(offers) => (StatusCode::OK, axum::Json(offers)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn selection_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.select_product(&id, &request.product_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

async fn plan_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.improvement_plan(&id) {
        Ok(tasks) => (StatusCode::OK, axum::Json(tasks)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn completion_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
    axum::Json(request): axum::Json<CompletionRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.set_task_completion(&id, &request.title, request.completed) {
        Ok(record) => {
            let payload = json!({
                "profile_id": record.profile.profile_id.0,
                "completed_tasks": record.completed_tasks,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn projections_handler<S>(
    State(service): State<Arc<LoanDiscoveryService<S>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.projections(&id, current_year()) {
        Ok(bundle) => (StatusCode::OK, axum::Json(bundle)).into_response(),
        Err(error) => error_response(error),
    }
}
