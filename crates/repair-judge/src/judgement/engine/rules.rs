use std::collections::BTreeSet;

use super::super::catalog::{ResolvedBand, Variance};
use super::super::domain::{EstimateLineItem, ItemJudgement, ReasonTag, ResultLabel};

const POSITION_CEILING_PCT: f64 = 150.0;
const DEGENERATE_BAND_POSITION_PCT: f64 = 50.0;

const FAIR_ITEM_SCORE: f64 = 90.0;
const CAUTION_BASE_SCORE: f64 = 60.0;
const CAUTION_MAX_OVERAGE: f64 = 0.2;
const EXCESSIVE_BASE_SCORE: f64 = 30.0;
const EXCESSIVE_THRESHOLD: f64 = 1.2;

pub(crate) fn judge_item(item: &EstimateLineItem, resolved: ResolvedBand<'_>) -> ItemJudgement {
    let band = resolved.band();
    let fair_min = band.min_price;
    let fair_max = band.max_price;
    let my_price = item.total_cost;

    let result_label = classify(my_price, fair_max);
    let reason_tags = reason_tags(item, resolved, result_label);

    ItemJudgement {
        item_id: item.id.clone(),
        fair_min,
        fair_max,
        my_price,
        position_pct: position_pct(my_price, fair_min, fair_max),
        result_label,
        reason_tags,
        notes: None,
    }
}

/// `price >= 1.2 * max` is excessive, `(max, 1.2 * max)` is caution, anything up to `max` is fair.
/// Compared as integers (`5 * price` vs `6 * max`) so both boundaries are exact.
pub(crate) fn classify(my_price: u64, fair_max: u64) -> ResultLabel {
    let price = u128::from(my_price);
    let max = u128::from(fair_max);

    if price * 5 >= max * 6 {
        ResultLabel::Excessive
    } else if price > max {
        ResultLabel::Caution
    } else {
        ResultLabel::Fair
    }
}

pub(crate) fn position_pct(my_price: u64, fair_min: u64, fair_max: u64) -> f64 {
    if fair_max <= fair_min {
        return DEGENERATE_BAND_POSITION_PCT;
    }

    let offset = my_price as f64 - fair_min as f64;
    let width = (fair_max - fair_min) as f64;
    (offset / width * 100.0).clamp(0.0, POSITION_CEILING_PCT)
}

pub(crate) fn reason_tags(
    item: &EstimateLineItem,
    resolved: ResolvedBand<'_>,
    label: ResultLabel,
) -> BTreeSet<ReasonTag> {
    let mut tags = BTreeSet::new();

    let band = match resolved {
        ResolvedBand::Default => {
            tags.insert(ReasonTag::UnclearItem);
            return tags;
        }
        ResolvedBand::Catalog(entry) => &entry.band,
    };

    if exceeds_by_thirty_percent(item.parts_cost, band.avg_parts_cost) {
        tags.insert(ReasonTag::HighPartPrice);
    }
    if exceeds_by_thirty_percent(item.labor_cost, band.avg_labor_cost) {
        tags.insert(ReasonTag::HighLabor);
    }
    if item.labor_cost > 0
        && item.parts_cost > 0
        && u128::from(item.labor_cost) > u128::from(item.parts_cost) * 2
    {
        tags.insert(ReasonTag::DupLabor);
    }
    if band.variance == Variance::High && label != ResultLabel::Fair {
        tags.insert(ReasonTag::MarketVariance);
    }

    tags
}

fn exceeds_by_thirty_percent(cost: u64, average: u64) -> bool {
    u128::from(cost) * 10 > u128::from(average) * 13
}

/// Per-item contribution to the overall score.
pub(crate) fn item_score(judgement: &ItemJudgement) -> f64 {
    let price = judgement.my_price as f64;
    let fair_max = judgement.fair_max as f64;

    match judgement.result_label {
        ResultLabel::Fair => FAIR_ITEM_SCORE,
        ResultLabel::Caution => {
            let overage = ((price - fair_max) / fair_max).min(CAUTION_MAX_OVERAGE);
            CAUTION_BASE_SCORE - overage * 100.0
        }
        ResultLabel::Excessive => {
            let threshold = fair_max * EXCESSIVE_THRESHOLD;
            // A zero-width band at zero yields NaN here; `min` discards it and scores 0.
            let overage = ((price - threshold) / threshold).min(1.0);
            (EXCESSIVE_BASE_SCORE - overage * EXCESSIVE_BASE_SCORE).max(0.0)
        }
    }
}
