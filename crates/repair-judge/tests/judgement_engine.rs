//! Scenarios for the judgement engine exercised through the public crate surface.

use std::collections::BTreeSet;
use std::sync::Arc;

use repair_judge::judgement::{
    CatalogEntry, EstimateLineItem, ItemId, JudgementEngine, JudgementError, PriceBand,
    PriceCatalog, ReasonTag, RepairCategory, ResultLabel, Variance,
};

fn item(id: &str, name: &str, labor: u64, parts: u64, total: u64) -> EstimateLineItem {
    EstimateLineItem {
        id: ItemId(id.to_string()),
        name: name.to_string(),
        category: RepairCategory::Etc,
        labor_cost: labor,
        parts_cost: parts,
        total_cost: total,
        note: None,
    }
}

fn priced(name: &str, total: u64) -> EstimateLineItem {
    item("item-1", name, 0, 0, total)
}

fn engine() -> JudgementEngine {
    JudgementEngine::standard()
}

#[test]
fn oil_change_within_band_is_fair() {
    let judgement = engine()
        .compute(&[item("oil", "엔진오일 교환", 10_000, 35_000, 45_000)])
        .expect("judgement computes");

    assert_eq!(judgement.result_label, ResultLabel::Fair);
    assert_eq!(judgement.confidence, 0.9);
    let result = &judgement.items[0];
    assert_eq!((result.fair_min, result.fair_max), (30_000, 80_000));
    assert_eq!(result.item_id, ItemId("oil".to_string()));
    assert!(result.reason_tags.is_empty());
}

#[test]
fn oil_change_slightly_over_band_is_caution() {
    let judgement = engine()
        .compute(&[priced("엔진오일 교환", 90_000)])
        .expect("judgement computes");

    assert_eq!(judgement.items[0].result_label, ResultLabel::Caution);
    assert_eq!(judgement.result_label, ResultLabel::Caution);
    assert_eq!(judgement.confidence, 0.6);
}

#[test]
fn brake_pads_far_over_band_are_excessive() {
    let judgement = engine()
        .compute(&[item("brake", "브레이크 패드", 80_000, 200_000, 280_000)])
        .expect("judgement computes");

    assert_eq!(judgement.result_label, ResultLabel::Excessive);
    assert_eq!(judgement.confidence, 0.3);
    assert!(judgement.items[0]
        .reason_tags
        .contains(&ReasonTag::HighPartPrice));
}

#[test]
fn worst_item_decides_the_overall_label() {
    let judgement = engine()
        .compute(&[
            item("oil", "엔진오일 교환", 10_000, 35_000, 45_000),
            item("brake", "브레이크 패드", 80_000, 200_000, 280_000),
        ])
        .expect("judgement computes");

    assert_eq!(judgement.items[0].result_label, ResultLabel::Fair);
    assert_eq!(judgement.items[1].result_label, ResultLabel::Excessive);
    assert_eq!(judgement.result_label, ResultLabel::Excessive);
    assert!(judgement.summary.contains("브레이크 패드"));
}

#[test]
fn unknown_items_use_the_default_band() {
    let judgement = engine()
        .compute(&[priced("알 수 없는 특수 수리", 100_000)])
        .expect("judgement computes");

    let result = &judgement.items[0];
    assert_eq!((result.fair_min, result.fair_max), (30_000, 500_000));
    assert_eq!(result.result_label, ResultLabel::Fair);
    assert_eq!(result.reason_tags, BTreeSet::from([ReasonTag::UnclearItem]));
}

#[test]
fn band_boundaries_are_inclusive() {
    let engine = engine();
    let label = |total| {
        engine
            .compute(&[priced("브레이크 패드", total)])
            .expect("judgement computes")
            .items[0]
            .result_label
    };

    assert_eq!(label(200_000), ResultLabel::Fair);
    assert_eq!(label(200_001), ResultLabel::Caution);
    assert_eq!(label(239_999), ResultLabel::Caution);
    assert_eq!(label(240_000), ResultLabel::Excessive);
}

#[test]
fn confidence_depends_only_on_the_label() {
    let engine = engine();
    let many_fair: Vec<_> = (0..5)
        .map(|index| item(&format!("w{index}"), "와이퍼 교체", 3_000, 15_000, 18_000))
        .collect();

    let single = engine.compute(&many_fair[..1]).expect("judgement computes");
    let several = engine.compute(&many_fair).expect("judgement computes");

    assert_eq!(single.confidence, several.confidence);
    assert_eq!(single.confidence, 0.9);
}

#[test]
fn positions_stay_within_bounds() {
    let engine = engine();
    for total in [0, 10_000, 80_000, 200_000, 1_000_000, u64::MAX / 4] {
        let judgement = engine
            .compute(&[priced("브레이크 패드", total)])
            .expect("judgement computes");
        let position = judgement.items[0].position_pct;
        assert!((0.0..=150.0).contains(&position), "{total} -> {position}");
        assert!(judgement.overall_score <= 100);
    }
}

#[test]
fn judging_is_idempotent() {
    let engine = engine();
    let items = vec![
        item("a", "타이어 교체", 20_000, 140_000, 160_000),
        item("b", "에어컨 점검", 90_000, 20_000, 110_000),
        item("c", "정체불명 작업", 0, 0, 70_000),
    ];

    let first = engine.compute(&items).expect("judgement computes");
    let second = engine.compute(&items).expect("judgement computes");

    assert_eq!(first, second);
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(engine().compute(&[]), Err(JudgementError::EmptyEstimate));
}

#[test]
fn fuzzy_matches_prefer_declaration_order() {
    let band = PriceBand {
        min_price: 1_000,
        max_price: 2_000,
        average_price: 1_500,
        avg_labor_cost: 500,
        avg_parts_cost: 1_000,
        variance: Variance::Low,
    };
    let catalog = PriceCatalog::new(vec![
        CatalogEntry {
            name: "엔진오일 교환".to_string(),
            category: RepairCategory::EngineOil,
            band,
        },
        CatalogEntry {
            name: "오일 교환".to_string(),
            category: RepairCategory::EngineOil,
            band: PriceBand {
                max_price: 9_000,
                ..band
            },
        },
    ])
    .expect("catalog builds");
    let engine = JudgementEngine::new(Arc::new(catalog));

    let judgement = engine
        .compute(&[priced("합성 엔진오일 교환 세트", 1_500)])
        .expect("judgement computes");

    assert_eq!(judgement.items[0].fair_max, 2_000);
}

#[test]
fn csv_catalogs_replace_the_builtin_table() {
    let csv = concat!(
        "name,category,min_price,max_price,average_price,avg_labor_cost,avg_parts_cost,variance\n",
        "브레이크 패드,BRAKE,100000,300000,200000,50000,150000,medium\n",
    );
    let catalog = PriceCatalog::from_reader(csv.as_bytes()).expect("catalog parses");
    let engine = JudgementEngine::new(Arc::new(catalog));

    let judgement = engine
        .compute(&[priced("브레이크 패드", 280_000)])
        .expect("judgement computes");

    assert_eq!(judgement.result_label, ResultLabel::Fair);
}
