use crate::cli::ServeArgs;
use crate::infra::{default_assessment_config, AppState, InMemorySessionStore};
use crate::routes::with_discovery_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loanbridge::config::AppConfig;
use loanbridge::error::AppError;
use loanbridge::telemetry;
use loanbridge::workflows::discovery::{LoanDiscoveryService, VisaLookupSimulator};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemorySessionStore::default());
    let discovery_service = Arc::new(LoanDiscoveryService::new(
        store,
        default_assessment_config(),
        VisaLookupSimulator::new(config.simulator.lookup_latency()),
    ));

    let app = with_discovery_routes(discovery_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan discovery service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
