use chrono::{Datelike, NaiveDate};

use super::domain::{Estimate, FeedbackInput, NewCar, NewEstimateItem};

pub const MIN_CAR_YEAR: i32 = 1980;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Boundary checks applied before anything is stored or judged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("year {year} must be between {min} and {max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("rating {0} must be between 1 and 5")]
    RatingOutOfRange(u8),
    #[error("estimate has no items; add items before requesting a judgement")]
    EstimateHasNoItems,
    #[error("invalid request body: {0}")]
    MalformedBody(String),
}

pub fn check_car(input: &NewCar, today: NaiveDate) -> Result<(), ValidationError> {
    require_text("make", &input.make)?;
    require_text("model", &input.model)?;

    let max = today.year() + 1;
    if input.year < MIN_CAR_YEAR || input.year > max {
        return Err(ValidationError::YearOutOfRange {
            year: input.year,
            min: MIN_CAR_YEAR,
            max,
        });
    }

    Ok(())
}

pub fn check_item(input: &NewEstimateItem) -> Result<(), ValidationError> {
    require_text("name", &input.name)
}

pub fn check_feedback(input: &FeedbackInput) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
        return Err(ValidationError::RatingOutOfRange(input.rating));
    }
    Ok(())
}

pub fn check_judgeable(estimate: &Estimate) -> Result<(), ValidationError> {
    if estimate.items.is_empty() {
        return Err(ValidationError::EstimateHasNoItems);
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}
