use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use repair_judge::error::AppError;
use repair_judge::estimates::{
    estimate_router, ApiSuccess, EstimateRepository, EstimateService, ValidationError,
};
use repair_judge::judgement::{EstimateLineItem, Judgement, JudgementEngine};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Stateless judgement request: line items in, verdict out, nothing stored.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    pub(crate) items: Vec<EstimateLineItem>,
}

pub(crate) fn with_estimate_routes<R>(service: Arc<EstimateService<R>>) -> axum::Router
where
    R: EstimateRepository + 'static,
{
    estimate_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/judge/preview",
            axum::routing::post(judge_preview_endpoint),
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

pub(crate) async fn judge_preview_endpoint(
    Extension(engine): Extension<Arc<JudgementEngine>>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<ApiSuccess<Judgement>>, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    let judgement = engine.compute(&payload.items)?;
    Ok(Json(ApiSuccess::new(judgement)))
}
