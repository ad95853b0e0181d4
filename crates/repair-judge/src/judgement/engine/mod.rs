mod policy;
mod rules;

use std::sync::Arc;

use tracing::debug;

use super::catalog::PriceCatalog;
use super::domain::{EstimateLineItem, ItemJudgement, Judgement};

/// Stateless judge that prices line items against an injected reference catalog.
///
/// Holds no mutable state; a single engine can be shared across threads and every call
/// with the same items returns the same judgement.
#[derive(Debug, Clone)]
pub struct JudgementEngine {
    catalog: Arc<PriceCatalog>,
}

impl JudgementEngine {
    pub fn new(catalog: Arc<PriceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(PriceCatalog::standard()))
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn compute(&self, lines: &[EstimateLineItem]) -> Result<Judgement, JudgementError> {
        if lines.is_empty() {
            return Err(JudgementError::EmptyEstimate);
        }

        let items: Vec<ItemJudgement> = lines
            .iter()
            .map(|line| rules::judge_item(line, self.catalog.resolve(&line.name)))
            .collect();

        let result_label = policy::overall_label(&items);
        let overall_score = policy::overall_score(lines, &items);
        let summary = policy::summary(result_label, lines, &items);
        let badges = policy::badges(lines, &items);

        debug!(
            label = result_label.code(),
            score = overall_score,
            items = items.len(),
            "estimate judged"
        );

        Ok(Judgement {
            result_label,
            confidence: result_label.confidence(),
            overall_score,
            summary,
            badges,
            items,
        })
    }
}

impl Default for JudgementEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Input the engine refuses to judge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JudgementError {
    #[error("estimate has no line items to judge")]
    EmptyEstimate,
}
