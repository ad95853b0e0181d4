//! Estimate intake, versioned judgement storage, feedback, and the HTTP surface around the
//! judgement engine.

pub mod domain;
mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    CarId, CarProfile, Estimate, EstimateId, EstimateItem, EstimateSource, EstimateStatus,
    Feedback, FeedbackId, FeedbackInput, JudgementDraft, JudgementId, JudgementRecord,
    JudgementStatus, NewCar, NewEstimate, NewEstimateItem, NewJudgement, UserId,
};
pub use memory::InMemoryEstimateRepository;
pub use repository::{EstimateRepository, RepositoryError};
pub use router::{estimate_router, USER_HEADER};
pub use service::{EstimateService, EstimateServiceError, RECENT_OTHERS_LIMIT};
pub use validation::ValidationError;
pub use views::{
    ApiFailure, ApiSuccess, CarSummary, JudgementHistoryView, JudgementItemView,
    JudgementResultView, JudgementView,
};
