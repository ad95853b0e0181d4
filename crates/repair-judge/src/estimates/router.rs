use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

use super::domain::{
    EstimateId, FeedbackInput, JudgementId, NewCar, NewEstimate, NewEstimateItem, NewJudgement,
    UserId,
};
use super::repository::{EstimateRepository, RepositoryError};
use super::service::{EstimateService, EstimateServiceError, RECENT_OTHERS_LIMIT};
use super::validation::ValidationError;
use super::views::{ApiFailure, ApiSuccess, JudgementView};
use crate::judgement::reason_tag_catalog;

/// Header carrying the caller's user id. Requests without it act as [`UserId::DEFAULT`].
pub const USER_HEADER: &str = "x-user-id";

type SharedService<R> = Arc<EstimateService<R>>;

/// Router builder exposing the car, estimate, and judgement endpoints.
pub fn estimate_router<R>(service: SharedService<R>) -> Router
where
    R: EstimateRepository + 'static,
{
    Router::new()
        .route(
            "/api/cars",
            get(list_cars_handler::<R>).post(register_car_handler::<R>),
        )
        .route("/api/estimates", post(create_estimate_handler::<R>))
        .route("/api/estimates/:estimate_id", get(estimate_handler::<R>))
        .route(
            "/api/estimates/:estimate_id/items",
            post(add_item_handler::<R>),
        )
        .route("/api/judgements", post(request_judgement_handler::<R>))
        .route(
            "/api/judgements/recent-others",
            get(recent_others_handler::<R>),
        )
        .route("/api/judgements/:judgement_id", get(judgement_handler::<R>))
        .route(
            "/api/judgements/:judgement_id/feedback",
            post(feedback_handler::<R>),
        )
        .route("/api/me/judgements", get(my_judgements_handler::<R>))
        .route("/api/reason-tags", get(reason_tags_handler))
        .with_state(service)
}

pub(crate) fn caller(headers: &HeaderMap) -> UserId {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
        .unwrap_or_default()
}

pub(crate) async fn register_car_handler<R>(
    State(service): State<SharedService<R>>,
    headers: HeaderMap,
    payload: Result<Json<NewCar>, JsonRejection>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(StatusCode::CREATED, service.register_car(&caller(&headers), input))
}

pub(crate) async fn list_cars_handler<R>(
    State(service): State<SharedService<R>>,
    headers: HeaderMap,
) -> Response
where
    R: EstimateRepository + 'static,
{
    respond(StatusCode::OK, service.list_cars(&caller(&headers)))
}

pub(crate) async fn create_estimate_handler<R>(
    State(service): State<SharedService<R>>,
    headers: HeaderMap,
    payload: Result<Json<NewEstimate>, JsonRejection>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.create_estimate(&caller(&headers), input),
    )
}

pub(crate) async fn estimate_handler<R>(
    State(service): State<SharedService<R>>,
    Path(estimate_id): Path<String>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    respond(StatusCode::OK, service.get_estimate(&EstimateId(estimate_id)))
}

pub(crate) async fn add_item_handler<R>(
    State(service): State<SharedService<R>>,
    Path(estimate_id): Path<String>,
    payload: Result<Json<NewEstimateItem>, JsonRejection>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.add_item(&EstimateId(estimate_id), input),
    )
}

pub(crate) async fn request_judgement_handler<R>(
    State(service): State<SharedService<R>>,
    payload: Result<Json<NewJudgement>, JsonRejection>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    let result = service
        .request_judgement(&input.estimate_id)
        .map(|record| JudgementView::from(&record));
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn judgement_handler<R>(
    State(service): State<SharedService<R>>,
    Path(judgement_id): Path<String>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let result = service
        .get_judgement(&JudgementId(judgement_id))
        .map(|record| JudgementView::from(&record));
    respond(StatusCode::OK, result)
}

pub(crate) async fn feedback_handler<R>(
    State(service): State<SharedService<R>>,
    Path(judgement_id): Path<String>,
    payload: Result<Json<FeedbackInput>, JsonRejection>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.submit_feedback(&JudgementId(judgement_id), input),
    )
}

pub(crate) async fn recent_others_handler<R>(
    State(service): State<SharedService<R>>,
    headers: HeaderMap,
) -> Response
where
    R: EstimateRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.recent_others(&caller(&headers), RECENT_OTHERS_LIMIT),
    )
}

pub(crate) async fn my_judgements_handler<R>(
    State(service): State<SharedService<R>>,
    headers: HeaderMap,
) -> Response
where
    R: EstimateRepository + 'static,
{
    respond(StatusCode::OK, service.my_judgements(&caller(&headers)))
}

pub(crate) async fn reason_tags_handler() -> Response {
    (StatusCode::OK, Json(ApiSuccess::new(reason_tag_catalog()))).into_response()
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, EstimateServiceError>) -> Response {
    match result {
        Ok(data) => (status, Json(ApiSuccess::new(data))).into_response(),
        Err(error) => failure(error),
    }
}

fn rejected(rejection: JsonRejection) -> Response {
    failure(ValidationError::MalformedBody(rejection.body_text()).into())
}

pub(crate) fn failure(error: EstimateServiceError) -> Response {
    let (status, code) = match &error {
        EstimateServiceError::Validation(_) | EstimateServiceError::Judgement(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        }
        EstimateServiceError::Repository(RepositoryError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        EstimateServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "CONFLICT")
        }
        EstimateServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(%error, "estimate request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    (status, Json(ApiFailure::new(code, error.to_string()))).into_response()
}
