use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use loanbridge::workflows::discovery::{
    discovery_router, LoanDiscoveryService, LoanProduct, SessionStore,
};

#[derive(Debug, Serialize)]
pub(crate) struct CatalogResponse {
    pub(crate) product_count: usize,
    pub(crate) products: Vec<LoanProduct>,
}

pub(crate) fn with_discovery_routes<S>(service: Arc<LoanDiscoveryService<S>>) -> axum::Router
where
    S: SessionStore + 'static,
{
    let catalog = service.catalog().to_vec();

    discovery_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/discovery/catalog",
            axum::routing::get(move || catalog_endpoint(catalog)),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The unadjusted catalog, for landing pages that render products before a
/// profile exists.
pub(crate) async fn catalog_endpoint(catalog: Vec<LoanProduct>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        product_count: catalog.len(),
        products: catalog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn catalog_endpoint_returns_the_three_products() {
        let catalog = loanbridge::workflows::discovery::standard_catalog();
        let Json(body) = catalog_endpoint(catalog).await;
        assert_eq!(body.product_count, 3);
        assert_eq!(body.products.len(), 3);
        assert_eq!(body.products[0].id, "micro-loan");

        let rendered = serde_json::to_value(&body).expect("catalog serializes");
        assert_eq!(rendered["product_count"], 3);
    }
}
