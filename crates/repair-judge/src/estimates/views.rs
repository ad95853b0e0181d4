use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    CarProfile, Estimate, EstimateId, JudgementId, JudgementRecord, JudgementStatus,
};
use crate::judgement::{ItemId, ReasonTag, RepairCategory, ResultLabel};

/// `{"ok": true, "data": ...}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSuccess<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// `{"ok": false, "error": {"code", "message"}}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiFailure {
    pub ok: bool,
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiFailure {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: ApiErrorBody {
                code,
                message: message.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgementResultView {
    pub label: ResultLabel,
    pub confidence: f64,
    pub overall_score: u8,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgementItemView {
    pub item_id: ItemId,
    pub name: String,
    pub category: RepairCategory,
    pub fair_min: u64,
    pub fair_max: u64,
    pub my_price: u64,
    pub position_pct: f64,
    pub result_label: ResultLabel,
    pub reason_tags: BTreeSet<ReasonTag>,
    pub notes: Option<String>,
}

/// Full judgement payload returned by the judgement endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgementView {
    pub id: JudgementId,
    pub estimate_id: EstimateId,
    pub version: u32,
    pub status: JudgementStatus,
    pub result: JudgementResultView,
    pub items: Vec<JudgementItemView>,
    pub created_at: DateTime<Utc>,
}

impl From<&JudgementRecord> for JudgementView {
    fn from(record: &JudgementRecord) -> Self {
        let judgement = &record.judgement;
        let items = record
            .items
            .iter()
            .zip(&judgement.items)
            .map(|(line, item)| JudgementItemView {
                item_id: item.item_id.clone(),
                name: line.name.clone(),
                category: line.category,
                fair_min: item.fair_min,
                fair_max: item.fair_max,
                my_price: item.my_price,
                position_pct: item.position_pct,
                result_label: item.result_label,
                reason_tags: item.reason_tags.clone(),
                notes: item.notes.clone(),
            })
            .collect();

        Self {
            id: record.id.clone(),
            estimate_id: record.estimate_id.clone(),
            version: record.version,
            status: record.status,
            result: result_view(record, true),
            items,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarSummary {
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl From<CarProfile> for CarSummary {
    fn from(car: CarProfile) -> Self {
        Self {
            make: car.make,
            model: car.model,
            year: car.year,
        }
    }
}

/// Compact history entry for "my judgements" and "recent from others" listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgementHistoryView {
    pub id: JudgementId,
    pub estimate_id: EstimateId,
    pub version: u32,
    pub status: JudgementStatus,
    pub result: JudgementResultView,
    pub car: Option<CarSummary>,
    pub shop_name: Option<String>,
    pub total_amount: u64,
    pub created_at: DateTime<Utc>,
}

impl JudgementHistoryView {
    pub fn new(
        record: JudgementRecord,
        estimate: &Estimate,
        car: Option<CarSummary>,
        include_badges: bool,
    ) -> Self {
        Self {
            result: result_view(&record, include_badges),
            id: record.id,
            estimate_id: record.estimate_id,
            version: record.version,
            status: record.status,
            car,
            shop_name: estimate.shop_name.clone(),
            total_amount: estimate.total_amount,
            created_at: record.created_at,
        }
    }
}

fn result_view(record: &JudgementRecord, include_badges: bool) -> JudgementResultView {
    let judgement = &record.judgement;
    JudgementResultView {
        label: judgement.result_label,
        confidence: judgement.confidence,
        overall_score: judgement.overall_score,
        summary: judgement.summary.clone(),
        badges: include_badges.then(|| judgement.badges.clone()),
    }
}
