use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::judgement::{EstimateLineItem, ItemId, Judgement, RepairCategory};

/// Caller identity taken from the `x-user-id` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub const DEFAULT: &'static str = "user_1";
}

impl Default for UserId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JudgementId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(pub String);

/// A vehicle registered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarProfile {
    pub id: CarId,
    pub user_id: UserId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate_no: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    #[default]
    Manual,
    Photo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    Submitted,
}

/// Stored line item: the engine input plus ownership metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateItem {
    #[serde(flatten)]
    pub line: EstimateLineItem,
    pub estimate_id: EstimateId,
    pub created_at: DateTime<Utc>,
}

/// Repair quote from a shop, built up item by item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub id: EstimateId,
    pub user_id: UserId,
    pub car_id: Option<CarId>,
    pub source: EstimateSource,
    pub status: EstimateStatus,
    pub shop_name: Option<String>,
    pub total_amount: u64,
    pub items: Vec<EstimateItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Estimate {
    /// Append an item, recompute the total, and mark the estimate submitted.
    pub fn push_item(&mut self, item: EstimateItem) {
        self.updated_at = item.created_at;
        self.items.push(item);
        self.total_amount = self.items.iter().map(|item| item.line.total_cost).sum();
        self.status = EstimateStatus::Submitted;
    }

    pub fn line_items(&self) -> Vec<EstimateLineItem> {
        self.items.iter().map(|item| item.line.clone()).collect()
    }
}

/// Judging is synchronous, so every stored judgement is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgementStatus {
    Done,
}

/// Judgement about to be stored; the repository assigns its version.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgementDraft {
    pub id: JudgementId,
    pub estimate_id: EstimateId,
    pub status: JudgementStatus,
    pub judgement: Judgement,
    pub items: Vec<EstimateLineItem>,
    pub created_at: DateTime<Utc>,
}

impl JudgementDraft {
    pub fn into_record(self, version: u32) -> JudgementRecord {
        JudgementRecord {
            id: self.id,
            estimate_id: self.estimate_id,
            version,
            status: self.status,
            judgement: self.judgement,
            items: self.items,
            created_at: self.created_at,
        }
    }
}

/// Immutable, versioned judgement of one estimate. `items` is the snapshot that was judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgementRecord {
    pub id: JudgementId,
    pub estimate_id: EstimateId,
    pub version: u32,
    pub status: JudgementStatus,
    pub judgement: Judgement,
    pub items: Vec<EstimateLineItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub judgement_id: JudgementId,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub plate_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEstimate {
    #[serde(default)]
    pub car_id: Option<CarId>,
    #[serde(default)]
    pub source: Option<EstimateSource>,
    #[serde(default)]
    pub shop_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEstimateItem {
    pub name: String,
    pub category: RepairCategory,
    #[serde(default)]
    pub labor_cost: u64,
    #[serde(default)]
    pub parts_cost: u64,
    pub total_cost: u64,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewEstimateItem {
    pub fn into_line(self, id: ItemId) -> EstimateLineItem {
        EstimateLineItem {
            id,
            name: self.name.trim().to_string(),
            category: self.category,
            labor_cost: self.labor_cost,
            parts_cost: self.parts_cost,
            total_cost: self.total_cost,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJudgement {
    pub estimate_id: EstimateId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}
