use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    CarId, CarProfile, Estimate, EstimateId, EstimateItem, EstimateStatus, Feedback,
    FeedbackId, FeedbackInput, JudgementDraft, JudgementId, JudgementRecord, JudgementStatus,
    NewCar, NewEstimate, NewEstimateItem, UserId,
};
use super::repository::{EstimateRepository, RepositoryError};
use super::validation::{self, ValidationError};
use super::views::{CarSummary, JudgementHistoryView};
use crate::judgement::{ItemId, JudgementEngine, JudgementError};

pub const RECENT_OTHERS_LIMIT: usize = 10;

static CAR_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ESTIMATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ITEM_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static JUDGEMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static FEEDBACK_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// Service composing the repository and the judgement engine.
pub struct EstimateService<R> {
    repository: Arc<R>,
    engine: Arc<JudgementEngine>,
}

impl<R> EstimateService<R>
where
    R: EstimateRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<JudgementEngine>) -> Self {
        Self { repository, engine }
    }

    pub fn register_car(
        &self,
        user: &UserId,
        input: NewCar,
    ) -> Result<CarProfile, EstimateServiceError> {
        let now = Utc::now();
        validation::check_car(&input, now.date_naive())?;

        let car = CarProfile {
            id: CarId(next_id(&CAR_SEQUENCE, "car")),
            user_id: user.clone(),
            make: input.make.trim().to_string(),
            model: input.model.trim().to_string(),
            year: input.year,
            plate_no: input.plate_no,
            created_at: now,
        };

        Ok(self.repository.insert_car(car)?)
    }

    pub fn list_cars(&self, user: &UserId) -> Result<Vec<CarProfile>, EstimateServiceError> {
        Ok(self.repository.cars_for_user(user)?)
    }

    pub fn create_estimate(
        &self,
        user: &UserId,
        input: NewEstimate,
    ) -> Result<Estimate, EstimateServiceError> {
        let now = Utc::now();
        let estimate = Estimate {
            id: EstimateId(next_id(&ESTIMATE_SEQUENCE, "est")),
            user_id: user.clone(),
            car_id: input.car_id,
            source: input.source.unwrap_or_default(),
            status: EstimateStatus::Draft,
            shop_name: input.shop_name,
            total_amount: 0,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert_estimate(estimate)?;
        debug!(estimate = %stored.id.0, user = %user.0, "estimate created");
        Ok(stored)
    }

    pub fn get_estimate(&self, id: &EstimateId) -> Result<Estimate, EstimateServiceError> {
        let estimate = self
            .repository
            .fetch_estimate(id)?
            .ok_or(RepositoryError::NotFound("estimate"))?;
        Ok(estimate)
    }

    pub fn add_item(
        &self,
        estimate_id: &EstimateId,
        input: NewEstimateItem,
    ) -> Result<EstimateItem, EstimateServiceError> {
        validation::check_item(&input)?;

        let item = EstimateItem {
            line: input.into_line(ItemId(next_id(&ITEM_SEQUENCE, "item"))),
            estimate_id: estimate_id.clone(),
            created_at: Utc::now(),
        };

        let estimate = self.repository.append_item(item.clone())?;
        debug!(
            estimate = %estimate.id.0,
            items = estimate.items.len(),
            total = estimate.total_amount,
            "estimate item added"
        );
        Ok(item)
    }

    /// Judge the current items of an estimate and store the result as a new version.
    pub fn request_judgement(
        &self,
        estimate_id: &EstimateId,
    ) -> Result<JudgementRecord, EstimateServiceError> {
        let estimate = self.get_estimate(estimate_id)?;
        validation::check_judgeable(&estimate)?;

        let items = estimate.line_items();
        let judgement = self.engine.compute(&items)?;

        let record = self.repository.record_judgement(JudgementDraft {
            id: JudgementId(next_id(&JUDGEMENT_SEQUENCE, "jdg")),
            estimate_id: estimate.id.clone(),
            status: JudgementStatus::Done,
            judgement,
            items,
            created_at: Utc::now(),
        })?;

        info!(
            estimate = %record.estimate_id.0,
            judgement = %record.id.0,
            version = record.version,
            label = record.judgement.result_label.code(),
            score = record.judgement.overall_score,
            "estimate judged"
        );
        Ok(record)
    }

    pub fn get_judgement(&self, id: &JudgementId) -> Result<JudgementRecord, EstimateServiceError> {
        let record = self
            .repository
            .fetch_judgement(id)?
            .ok_or(RepositoryError::NotFound("judgement"))?;
        Ok(record)
    }

    pub fn submit_feedback(
        &self,
        judgement_id: &JudgementId,
        input: FeedbackInput,
    ) -> Result<Feedback, EstimateServiceError> {
        validation::check_feedback(&input)?;
        self.get_judgement(judgement_id)?;

        let feedback = Feedback {
            id: FeedbackId(next_id(&FEEDBACK_SEQUENCE, "fb")),
            judgement_id: judgement_id.clone(),
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        };
        Ok(self.repository.insert_feedback(feedback)?)
    }

    /// The caller's judgement history, newest first.
    pub fn my_judgements(
        &self,
        user: &UserId,
    ) -> Result<Vec<JudgementHistoryView>, EstimateServiceError> {
        self.repository
            .judgements_for_user(user)?
            .into_iter()
            .map(|record| self.history_entry(record, true))
            .collect()
    }

    /// Latest completed judgements from other users.
    pub fn recent_others(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<JudgementHistoryView>, EstimateServiceError> {
        self.repository
            .recent_judgements_excluding(user, limit)?
            .into_iter()
            .map(|record| self.history_entry(record, false))
            .collect()
    }

    fn history_entry(
        &self,
        record: JudgementRecord,
        include_badges: bool,
    ) -> Result<JudgementHistoryView, EstimateServiceError> {
        let estimate = self.get_estimate(&record.estimate_id)?;
        let car = match &estimate.car_id {
            Some(car_id) => self.repository.fetch_car(car_id)?.map(CarSummary::from),
            None => None,
        };

        Ok(JudgementHistoryView::new(record, &estimate, car, include_badges))
    }
}

/// Error raised by the estimate service.
#[derive(Debug, thiserror::Error)]
pub enum EstimateServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Judgement(#[from] JudgementError),
}
