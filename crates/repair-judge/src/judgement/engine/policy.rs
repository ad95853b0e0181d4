use super::super::domain::{EstimateLineItem, ItemJudgement, ResultLabel};
use super::rules::item_score;

const SUMMARY_NAME_LIMIT: usize = 2;

/// Worst label present wins; no voting.
pub(crate) fn overall_label(items: &[ItemJudgement]) -> ResultLabel {
    items
        .iter()
        .map(|item| item.result_label)
        .max()
        .unwrap_or(ResultLabel::Fair)
}

/// Cost-weighted average of per-item scores, uniform weights when every item is free.
pub(crate) fn overall_score(lines: &[EstimateLineItem], items: &[ItemJudgement]) -> u8 {
    if items.is_empty() {
        return 0;
    }

    let total_amount: u128 = lines.iter().map(|line| u128::from(line.total_cost)).sum();
    let uniform_weight = 1.0 / items.len() as f64;

    let weighted: f64 = lines
        .iter()
        .zip(items)
        .map(|(line, item)| {
            let weight = if total_amount > 0 {
                line.total_cost as f64 / total_amount as f64
            } else {
                uniform_weight
            };
            item_score(item) * weight
        })
        .sum();

    weighted.clamp(0.0, 100.0).round() as u8
}

pub(crate) fn summary(
    label: ResultLabel,
    lines: &[EstimateLineItem],
    items: &[ItemJudgement],
) -> String {
    if label == ResultLabel::Fair {
        return "전반적으로 적정한 견적입니다. 안심하고 정비를 진행하셔도 됩니다.".to_string();
    }

    let names = lines
        .iter()
        .zip(items)
        .filter(|(_, item)| item.result_label == label)
        .take(SUMMARY_NAME_LIMIT)
        .map(|(line, _)| line.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match label {
        ResultLabel::Caution => format!(
            "{names} 항목이 적정 범위를 초과합니다. 정비소에 가격 근거를 확인해보세요."
        ),
        _ => format!(
            "{names} 항목의 가격이 과다합니다. 다른 정비소와 비교 견적을 받아보시기 바랍니다."
        ),
    }
}

pub(crate) fn badges(lines: &[EstimateLineItem], items: &[ItemJudgement]) -> Vec<String> {
    lines
        .iter()
        .zip(items)
        .map(|(line, item)| format!("{} {}", line.name, item.result_label.localized()))
        .collect()
}
