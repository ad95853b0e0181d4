use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for estimate line items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

/// Coarse repair category attached to each line item. Informational only; band lookup is by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairCategory {
    EngineOil,
    Brake,
    Tire,
    Suspension,
    Battery,
    Cooling,
    Electrical,
    Etc,
}

impl RepairCategory {
    pub fn ordered() -> [RepairCategory; 8] {
        [
            RepairCategory::EngineOil,
            RepairCategory::Brake,
            RepairCategory::Tire,
            RepairCategory::Suspension,
            RepairCategory::Battery,
            RepairCategory::Cooling,
            RepairCategory::Electrical,
            RepairCategory::Etc,
        ]
    }

    pub fn code(self) -> &'static str {
        match self {
            RepairCategory::EngineOil => "ENGINE_OIL",
            RepairCategory::Brake => "BRAKE",
            RepairCategory::Tire => "TIRE",
            RepairCategory::Suspension => "SUSPENSION",
            RepairCategory::Battery => "BATTERY",
            RepairCategory::Cooling => "COOLING",
            RepairCategory::Electrical => "ELECTRICAL",
            RepairCategory::Etc => "ETC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepairCategory::EngineOil => "엔진오일",
            RepairCategory::Brake => "브레이크",
            RepairCategory::Tire => "타이어",
            RepairCategory::Suspension => "서스펜션",
            RepairCategory::Battery => "배터리",
            RepairCategory::Cooling => "냉각/에어컨",
            RepairCategory::Electrical => "전기/전자",
            RepairCategory::Etc => "기타",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RepairCategory::EngineOil => "🔧",
            RepairCategory::Brake => "🛑",
            RepairCategory::Tire => "⚙️",
            RepairCategory::Suspension => "🔩",
            RepairCategory::Battery => "🔋",
            RepairCategory::Cooling => "❄️",
            RepairCategory::Electrical => "⚡",
            RepairCategory::Etc => "📋",
        }
    }
}

/// A single priced line on a repair estimate, as handed to the engine.
///
/// `total_cost` is the authoritative price. It is usually `labor_cost + parts_cost`
/// but nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateLineItem {
    pub id: ItemId,
    pub name: String,
    pub category: RepairCategory,
    pub labor_cost: u64,
    pub parts_cost: u64,
    pub total_cost: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Three-tier verdict, declared in ascending severity so `max` yields the worst label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultLabel {
    Fair,
    Caution,
    Excessive,
}

impl ResultLabel {
    pub fn code(self) -> &'static str {
        match self {
            ResultLabel::Fair => "FAIR",
            ResultLabel::Caution => "CAUTION",
            ResultLabel::Excessive => "EXCESSIVE",
        }
    }

    /// Display copy used in badges.
    pub fn localized(self) -> &'static str {
        match self {
            ResultLabel::Fair => "적정",
            ResultLabel::Caution => "주의",
            ResultLabel::Excessive => "과다",
        }
    }

    /// Fixed confidence reported for an overall verdict.
    pub fn confidence(self) -> f64 {
        match self {
            ResultLabel::Fair => 0.9,
            ResultLabel::Caution => 0.6,
            ResultLabel::Excessive => 0.3,
        }
    }
}

/// Machine-readable explanation attached to an item verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonTag {
    UnclearItem,
    HighPartPrice,
    HighLabor,
    DupLabor,
    MarketVariance,
}

impl ReasonTag {
    pub fn all() -> [ReasonTag; 5] {
        [
            ReasonTag::UnclearItem,
            ReasonTag::HighPartPrice,
            ReasonTag::HighLabor,
            ReasonTag::DupLabor,
            ReasonTag::MarketVariance,
        ]
    }

    pub fn code(self) -> &'static str {
        match self {
            ReasonTag::UnclearItem => "UNCLEAR_ITEM",
            ReasonTag::HighPartPrice => "HIGH_PART_PRICE",
            ReasonTag::HighLabor => "HIGH_LABOR",
            ReasonTag::DupLabor => "DUP_LABOR",
            ReasonTag::MarketVariance => "MARKET_VARIANCE",
        }
    }
}

/// Per-item verdict. One per input line item, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemJudgement {
    pub item_id: ItemId,
    pub fair_min: u64,
    pub fair_max: u64,
    pub my_price: u64,
    pub position_pct: f64,
    pub result_label: ResultLabel,
    pub reason_tags: BTreeSet<ReasonTag>,
    pub notes: Option<String>,
}

/// Overall verdict for an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgement {
    pub result_label: ResultLabel,
    pub confidence: f64,
    pub overall_score: u8,
    pub summary: String,
    pub badges: Vec<String>,
    pub items: Vec<ItemJudgement>,
}
