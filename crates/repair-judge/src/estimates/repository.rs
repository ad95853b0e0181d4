use super::domain::{
    CarId, CarProfile, Estimate, EstimateId, EstimateItem, Feedback, JudgementDraft,
    JudgementId, JudgementRecord, UserId,
};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait EstimateRepository: Send + Sync {
    fn insert_car(&self, car: CarProfile) -> Result<CarProfile, RepositoryError>;
    /// Cars owned by `user`, newest first.
    fn cars_for_user(&self, user: &UserId) -> Result<Vec<CarProfile>, RepositoryError>;
    fn fetch_car(&self, id: &CarId) -> Result<Option<CarProfile>, RepositoryError>;

    fn insert_estimate(&self, estimate: Estimate) -> Result<Estimate, RepositoryError>;
    fn fetch_estimate(&self, id: &EstimateId) -> Result<Option<Estimate>, RepositoryError>;
    /// Append an item to an existing estimate and return the updated estimate.
    fn append_item(&self, item: EstimateItem) -> Result<Estimate, RepositoryError>;

    /// Store a judgement with version `existing judgements for the estimate + 1`.
    ///
    /// Counting and inserting must happen atomically so that concurrent requests for the
    /// same estimate never share a version.
    fn record_judgement(&self, draft: JudgementDraft) -> Result<JudgementRecord, RepositoryError>;
    fn fetch_judgement(&self, id: &JudgementId) -> Result<Option<JudgementRecord>, RepositoryError>;
    /// Judgements of estimates owned by `user`, newest first.
    fn judgements_for_user(&self, user: &UserId) -> Result<Vec<JudgementRecord>, RepositoryError>;
    /// Completed judgements of estimates owned by anyone except `user`, newest first.
    fn recent_judgements_excluding(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<JudgementRecord>, RepositoryError>;

    fn insert_feedback(&self, feedback: Feedback) -> Result<Feedback, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
