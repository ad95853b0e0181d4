use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_estimate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use repair_judge::config::AppConfig;
use repair_judge::error::AppError;
use repair_judge::estimates::{EstimateService, InMemoryEstimateRepository};
use repair_judge::judgement::JudgementEngine;
use repair_judge::telemetry;
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

    let catalog = load_catalog(&config.catalog)?;
    let engine = Arc::new(JudgementEngine::new(Arc::new(catalog)));
    let repository = Arc::new(InMemoryEstimateRepository::default());
    let estimate_service = Arc::new(EstimateService::new(repository, engine.clone()));

    let app = with_estimate_routes(estimate_service)
        .layer(Extension(app_state))
        .layer(Extension(engine.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        catalog_entries = engine.catalog().len(),
        "repair judge api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
