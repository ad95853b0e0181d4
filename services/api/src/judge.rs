use crate::infra::load_catalog;
use clap::Args;
use repair_judge::config::{AppConfig, CatalogConfig};
use repair_judge::error::AppError;
use repair_judge::judgement::{EstimateLineItem, Judgement, JudgementEngine, PriceCatalog};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct JudgeArgs {
    /// JSON file holding an array of estimate line items
    #[arg(long)]
    pub(crate) items: PathBuf,
    /// CSV price catalog to use instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the judgement as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// CSV price catalog to use instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_judge(args: JudgeArgs) -> Result<(), AppError> {
    let JudgeArgs {
        items,
        catalog,
        json,
    } = args;

    let catalog = resolve_catalog(catalog)?;
    let raw = std::fs::read_to_string(&items)?;
    let items: Vec<EstimateLineItem> = serde_json::from_str(&raw)?;

    let engine = JudgementEngine::new(Arc::new(catalog));
    let judgement = engine.compute(&items)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&judgement)?);
    } else {
        print!("{}", render_judgement(&items, &judgement));
    }

    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = resolve_catalog(args.catalog)?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

fn resolve_catalog(path: Option<PathBuf>) -> Result<PriceCatalog, AppError> {
    let config = match path {
        Some(path) => CatalogConfig { path: Some(path) },
        None => AppConfig::load()?.catalog,
    };
    load_catalog(&config)
}

pub(crate) fn render_judgement(items: &[EstimateLineItem], judgement: &Judgement) -> String {
    let mut out = format!(
        "Overall: {} ({}) score {} confidence {:.1}\n{}\n\nItems\n",
        judgement.result_label.code(),
        judgement.result_label.localized(),
        judgement.overall_score,
        judgement.confidence,
        judgement.summary,
    );

    for (line, item) in items.iter().zip(&judgement.items) {
        out.push_str(&format!(
            "- {} {} [{}] {} KRW (fair {}-{}, position {:.0}%)\n",
            line.category.icon(),
            line.name,
            item.result_label.code(),
            item.my_price,
            item.fair_min,
            item.fair_max,
            item.position_pct,
        ));
        if !item.reason_tags.is_empty() {
            let tags: Vec<&str> = item.reason_tags.iter().map(|tag| tag.code()).collect();
            out.push_str(&format!("    reasons: {}\n", tags.join(", ")));
        }
    }

    out
}

pub(crate) fn render_catalog(catalog: &PriceCatalog) -> String {
    let mut out = format!("Reference prices ({} entries)\n", catalog.len());
    for entry in catalog.entries() {
        out.push_str(&format!(
            "- {} [{}] {}-{} KRW, avg {} (labor {}, parts {})\n",
            entry.name,
            entry.category.label(),
            entry.band.min_price,
            entry.band.max_price,
            entry.band.average_price,
            entry.band.avg_labor_cost,
            entry.band.avg_parts_cost,
        ));
    }
    out
}
