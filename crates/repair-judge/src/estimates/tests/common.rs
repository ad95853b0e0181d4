use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::estimates::domain::{
    CarId, CarProfile, Estimate, EstimateId, EstimateItem, Feedback, JudgementDraft,
    JudgementId, JudgementRecord, NewCar, NewEstimate, NewEstimateItem, UserId,
};
use crate::estimates::repository::{EstimateRepository, RepositoryError};
use crate::estimates::{estimate_router, EstimateService, InMemoryEstimateRepository};
use crate::judgement::{JudgementEngine, RepairCategory};

pub(super) fn user(name: &str) -> UserId {
    UserId(name.to_string())
}

pub(super) fn new_car() -> NewCar {
    NewCar {
        make: "현대".to_string(),
        model: "아반떼".to_string(),
        year: 2019,
        plate_no: Some("12가3456".to_string()),
    }
}

pub(super) fn new_estimate(car_id: Option<CarId>) -> NewEstimate {
    NewEstimate {
        car_id,
        source: None,
        shop_name: Some("스피드메이트 강남점".to_string()),
    }
}

pub(super) fn oil_item(total: u64) -> NewEstimateItem {
    NewEstimateItem {
        name: "엔진오일 교환".to_string(),
        category: RepairCategory::EngineOil,
        labor_cost: 10_000,
        parts_cost: total.saturating_sub(10_000),
        total_cost: total,
        note: None,
    }
}

pub(super) fn brake_item(total: u64) -> NewEstimateItem {
    NewEstimateItem {
        name: "브레이크 패드".to_string(),
        category: RepairCategory::Brake,
        labor_cost: 80_000,
        parts_cost: total.saturating_sub(80_000),
        total_cost: total,
        note: Some("앞바퀴".to_string()),
    }
}

pub(super) fn build_service() -> (
    EstimateService<InMemoryEstimateRepository>,
    Arc<InMemoryEstimateRepository>,
) {
    let repository = Arc::new(InMemoryEstimateRepository::default());
    let service = EstimateService::new(repository.clone(), Arc::new(JudgementEngine::standard()));
    (service, repository)
}

/// Estimate owned by `owner` holding the given items.
pub(super) fn estimate_with_items(
    service: &EstimateService<InMemoryEstimateRepository>,
    owner: &UserId,
    items: Vec<NewEstimateItem>,
) -> Estimate {
    let estimate = service
        .create_estimate(owner, new_estimate(None))
        .expect("estimate created");
    for item in items {
        service.add_item(&estimate.id, item).expect("item added");
    }
    service.get_estimate(&estimate.id).expect("estimate stored")
}

pub(super) fn estimate_router_with_service(
    service: EstimateService<InMemoryEstimateRepository>,
) -> axum::Router {
    estimate_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl UnavailableRepository {
    fn offline<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl EstimateRepository for UnavailableRepository {
    fn insert_car(&self, _car: CarProfile) -> Result<CarProfile, RepositoryError> {
        Self::offline()
    }

    fn cars_for_user(&self, _user: &UserId) -> Result<Vec<CarProfile>, RepositoryError> {
        Self::offline()
    }

    fn fetch_car(&self, _id: &CarId) -> Result<Option<CarProfile>, RepositoryError> {
        Self::offline()
    }

    fn insert_estimate(&self, _estimate: Estimate) -> Result<Estimate, RepositoryError> {
        Self::offline()
    }

    fn fetch_estimate(&self, _id: &EstimateId) -> Result<Option<Estimate>, RepositoryError> {
        Self::offline()
    }

    fn append_item(&self, _item: EstimateItem) -> Result<Estimate, RepositoryError> {
        Self::offline()
    }

    fn record_judgement(&self, _draft: JudgementDraft) -> Result<JudgementRecord, RepositoryError> {
        Self::offline()
    }

    fn fetch_judgement(
        &self,
        _id: &JudgementId,
    ) -> Result<Option<JudgementRecord>, RepositoryError> {
        Self::offline()
    }

    fn judgements_for_user(&self, _user: &UserId) -> Result<Vec<JudgementRecord>, RepositoryError> {
        Self::offline()
    }

    fn recent_judgements_excluding(
        &self,
        _user: &UserId,
        _limit: usize,
    ) -> Result<Vec<JudgementRecord>, RepositoryError> {
        Self::offline()
    }

    fn insert_feedback(&self, _feedback: Feedback) -> Result<Feedback, RepositoryError> {
        Self::offline()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
