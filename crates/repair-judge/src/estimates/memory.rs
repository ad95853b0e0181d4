use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    CarId, CarProfile, Estimate, EstimateId, EstimateItem, Feedback, JudgementDraft,
    JudgementId, JudgementRecord, JudgementStatus, UserId,
};
use super::repository::{EstimateRepository, RepositoryError};

#[derive(Debug, Default)]
struct Store {
    cars: Vec<CarProfile>,
    estimates: HashMap<EstimateId, Estimate>,
    judgements: Vec<JudgementRecord>,
    feedback: Vec<Feedback>,
}

impl Store {
    fn owner_of(&self, estimate_id: &EstimateId) -> Option<&UserId> {
        self.estimates
            .get(estimate_id)
            .map(|estimate| &estimate.user_id)
    }
}

/// Process-local repository. Vectors keep insertion order, so iterating in reverse yields
/// newest-first listings without relying on timestamps.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEstimateRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryEstimateRepository {
    fn store(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }

    pub fn feedback_for(&self, id: &JudgementId) -> Result<Vec<Feedback>, RepositoryError> {
        let store = self.store()?;
        Ok(store
            .feedback
            .iter()
            .filter(|feedback| &feedback.judgement_id == id)
            .cloned()
            .collect())
    }
}

impl EstimateRepository for InMemoryEstimateRepository {
    fn insert_car(&self, car: CarProfile) -> Result<CarProfile, RepositoryError> {
        let mut store = self.store()?;
        if store.cars.iter().any(|existing| existing.id == car.id) {
            return Err(RepositoryError::Conflict);
        }
        store.cars.push(car.clone());
        Ok(car)
    }

    fn cars_for_user(&self, user: &UserId) -> Result<Vec<CarProfile>, RepositoryError> {
        let store = self.store()?;
        Ok(store
            .cars
            .iter()
            .rev()
            .filter(|car| &car.user_id == user)
            .cloned()
            .collect())
    }

    fn fetch_car(&self, id: &CarId) -> Result<Option<CarProfile>, RepositoryError> {
        let store = self.store()?;
        Ok(store.cars.iter().find(|car| &car.id == id).cloned())
    }

    fn insert_estimate(&self, estimate: Estimate) -> Result<Estimate, RepositoryError> {
        let mut store = self.store()?;
        if store.estimates.contains_key(&estimate.id) {
            return Err(RepositoryError::Conflict);
        }
        store.estimates.insert(estimate.id.clone(), estimate.clone());
        Ok(estimate)
    }

    fn fetch_estimate(&self, id: &EstimateId) -> Result<Option<Estimate>, RepositoryError> {
        let store = self.store()?;
        Ok(store.estimates.get(id).cloned())
    }

    fn append_item(&self, item: EstimateItem) -> Result<Estimate, RepositoryError> {
        let mut store = self.store()?;
        let estimate = store
            .estimates
            .get_mut(&item.estimate_id)
            .ok_or(RepositoryError::NotFound("estimate"))?;
        if estimate
            .items
            .iter()
            .any(|existing| existing.line.id == item.line.id)
        {
            return Err(RepositoryError::Conflict);
        }
        estimate.push_item(item);
        Ok(estimate.clone())
    }

    fn record_judgement(&self, draft: JudgementDraft) -> Result<JudgementRecord, RepositoryError> {
        let mut store = self.store()?;
        if !store.estimates.contains_key(&draft.estimate_id) {
            return Err(RepositoryError::NotFound("estimate"));
        }
        if store.judgements.iter().any(|existing| existing.id == draft.id) {
            return Err(RepositoryError::Conflict);
        }

        let existing = store
            .judgements
            .iter()
            .filter(|record| record.estimate_id == draft.estimate_id)
            .count();
        let record = draft.into_record(existing as u32 + 1);
        store.judgements.push(record.clone());
        Ok(record)
    }

    fn fetch_judgement(
        &self,
        id: &JudgementId,
    ) -> Result<Option<JudgementRecord>, RepositoryError> {
        let store = self.store()?;
        Ok(store.judgements.iter().find(|record| &record.id == id).cloned())
    }

    fn judgements_for_user(&self, user: &UserId) -> Result<Vec<JudgementRecord>, RepositoryError> {
        let store = self.store()?;
        Ok(store
            .judgements
            .iter()
            .rev()
            .filter(|record| store.owner_of(&record.estimate_id) == Some(user))
            .cloned()
            .collect())
    }

    fn recent_judgements_excluding(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<JudgementRecord>, RepositoryError> {
        let store = self.store()?;
        Ok(store
            .judgements
            .iter()
            .rev()
            .filter(|record| record.status == JudgementStatus::Done)
            .filter(|record| store.owner_of(&record.estimate_id) != Some(user))
            .take(limit)
            .cloned()
            .collect())
    }

    fn insert_feedback(&self, feedback: Feedback) -> Result<Feedback, RepositoryError> {
        let mut store = self.store()?;
        if !store
            .judgements
            .iter()
            .any(|record| record.id == feedback.judgement_id)
        {
            return Err(RepositoryError::NotFound("judgement"));
        }
        store.feedback.push(feedback.clone());
        Ok(feedback)
    }
}
