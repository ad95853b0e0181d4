//! Fair-price judgement for repair estimates: reference catalog, per-item classification,
//! and aggregation into an overall verdict.

mod catalog;
pub mod copy;
pub mod domain;
mod engine;

pub use catalog::{CatalogEntry, CatalogError, PriceBand, PriceCatalog, ResolvedBand, Variance};
pub use copy::{reason_tag_catalog, ReasonTagCopy, ReasonTagView, TagSeverity};
pub use domain::{
    EstimateLineItem, ItemId, ItemJudgement, Judgement, ReasonTag, RepairCategory, ResultLabel,
};
pub use engine::{JudgementEngine, JudgementError};
