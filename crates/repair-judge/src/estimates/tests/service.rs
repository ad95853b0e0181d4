use super::common::*;
use crate::estimates::domain::{
    EstimateId, EstimateStatus, FeedbackInput, JudgementId, JudgementStatus, NewCar,
};
use crate::estimates::repository::RepositoryError;
use crate::estimates::validation::ValidationError;
use crate::estimates::{EstimateService, EstimateServiceError};
use crate::judgement::{JudgementEngine, ResultLabel};
use std::sync::Arc;

#[test]
fn add_item_recomputes_total_and_submits_estimate() {
    let (service, _) = build_service();
    let owner = user("user_1");
    let estimate = service
        .create_estimate(&owner, new_estimate(None))
        .expect("estimate created");
    assert_eq!(estimate.status, EstimateStatus::Draft);
    assert_eq!(estimate.total_amount, 0);

    let item = service
        .add_item(&estimate.id, oil_item(45_000))
        .expect("item added");
    service
        .add_item(&estimate.id, brake_item(280_000))
        .expect("item added");

    assert_eq!(item.estimate_id, estimate.id);
    let stored = service.get_estimate(&estimate.id).expect("estimate stored");
    assert_eq!(stored.status, EstimateStatus::Submitted);
    assert_eq!(stored.total_amount, 325_000);
    assert_eq!(stored.items.len(), 2);
}

#[test]
fn add_item_rejects_blank_names() {
    let (service, _) = build_service();
    let estimate = service
        .create_estimate(&user("user_1"), new_estimate(None))
        .expect("estimate created");

    let mut item = oil_item(45_000);
    item.name = "   ".to_string();

    match service.add_item(&estimate.id, item) {
        Err(EstimateServiceError::Validation(ValidationError::EmptyField { field: "name" })) => {}
        other => panic!("expected empty name error, got {other:?}"),
    }
}

#[test]
fn add_item_to_missing_estimate_is_not_found() {
    let (service, _) = build_service();

    match service.add_item(&EstimateId("est-missing".to_string()), oil_item(45_000)) {
        Err(EstimateServiceError::Repository(RepositoryError::NotFound("estimate"))) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn judgement_requires_items() {
    let (service, _) = build_service();
    let estimate = service
        .create_estimate(&user("user_1"), new_estimate(None))
        .expect("estimate created");

    match service.request_judgement(&estimate.id) {
        Err(EstimateServiceError::Validation(ValidationError::EstimateHasNoItems)) => {}
        other => panic!("expected empty estimate error, got {other:?}"),
    }
}

#[test]
fn judgements_are_versioned_per_estimate() {
    let (service, _) = build_service();
    let owner = user("user_1");
    let first = estimate_with_items(&service, &owner, vec![oil_item(45_000)]);
    let second = estimate_with_items(&service, &owner, vec![oil_item(45_000)]);

    let v1 = service.request_judgement(&first.id).expect("judged");
    let v2 = service.request_judgement(&first.id).expect("judged again");
    let other = service.request_judgement(&second.id).expect("judged");

    assert_eq!(v1.version, 1);
    assert_eq!(v2.version, 2);
    assert_eq!(other.version, 1);
    assert_ne!(v1.id, v2.id);
    assert_eq!(v1.status, JudgementStatus::Done);
}

#[test]
fn stored_judgements_keep_the_items_they_judged() {
    let (service, _) = build_service();
    let owner = user("user_1");
    let estimate = estimate_with_items(&service, &owner, vec![oil_item(45_000)]);

    let first = service.request_judgement(&estimate.id).expect("judged");
    service
        .add_item(&estimate.id, brake_item(280_000))
        .expect("item added");
    let second = service.request_judgement(&estimate.id).expect("judged");

    let reloaded = service.get_judgement(&first.id).expect("judgement stored");
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.judgement.result_label, ResultLabel::Fair);
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.judgement.result_label, ResultLabel::Excessive);
}

#[test]
fn feedback_is_attached_to_existing_judgements() {
    let (service, repository) = build_service();
    let estimate = estimate_with_items(&service, &user("user_1"), vec![oil_item(45_000)]);
    let record = service.request_judgement(&estimate.id).expect("judged");

    let feedback = service
        .submit_feedback(
            &record.id,
            FeedbackInput {
                rating: 4,
                comment: Some("도움이 됐어요".to_string()),
            },
        )
        .expect("feedback stored");

    assert_eq!(feedback.judgement_id, record.id);
    let stored = repository.feedback_for(&record.id).expect("feedback listed");
    assert_eq!(stored, vec![feedback]);
}

#[test]
fn feedback_validates_rating_and_judgement() {
    let (service, _) = build_service();
    let estimate = estimate_with_items(&service, &user("user_1"), vec![oil_item(45_000)]);
    let record = service.request_judgement(&estimate.id).expect("judged");

    match service.submit_feedback(&record.id, FeedbackInput { rating: 6, comment: None }) {
        Err(EstimateServiceError::Validation(ValidationError::RatingOutOfRange(6))) => {}
        other => panic!("expected rating error, got {other:?}"),
    }

    match service.submit_feedback(
        &JudgementId("jdg-missing".to_string()),
        FeedbackInput { rating: 3, comment: None },
    ) {
        Err(EstimateServiceError::Repository(RepositoryError::NotFound("judgement"))) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn register_car_rejects_out_of_range_years() {
    let (service, _) = build_service();
    let input = NewCar {
        year: 1975,
        ..new_car()
    };

    match service.register_car(&user("user_1"), input) {
        Err(EstimateServiceError::Validation(ValidationError::YearOutOfRange {
            year: 1975,
            ..
        })) => {}
        other => panic!("expected year error, got {other:?}"),
    }
}

#[test]
fn cars_are_listed_per_user_newest_first() {
    let (service, _) = build_service();
    let owner = user("user_1");
    let older = service.register_car(&owner, new_car()).expect("car stored");
    let newer = service
        .register_car(
            &owner,
            NewCar {
                make: "기아".to_string(),
                model: "K5".to_string(),
                year: 2022,
                plate_no: None,
            },
        )
        .expect("car stored");
    service
        .register_car(&user("user_2"), new_car())
        .expect("car stored");

    let cars = service.list_cars(&owner).expect("cars listed");
    let ids: Vec<_> = cars.iter().map(|car| car.id.clone()).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[test]
fn my_judgements_lists_only_the_callers_history() {
    let (service, _) = build_service();
    let owner = user("user_1");
    let car = service.register_car(&owner, new_car()).expect("car stored");
    let estimate = service
        .create_estimate(&owner, new_estimate(Some(car.id.clone())))
        .expect("estimate created");
    service
        .add_item(&estimate.id, brake_item(280_000))
        .expect("item added");
    let first = service.request_judgement(&estimate.id).expect("judged");
    let second = service.request_judgement(&estimate.id).expect("judged");

    let stranger = estimate_with_items(&service, &user("user_2"), vec![oil_item(45_000)]);
    service.request_judgement(&stranger.id).expect("judged");

    let history = service.my_judgements(&owner).expect("history listed");
    let ids: Vec<_> = history.iter().map(|entry| entry.id.clone()).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let latest = &history[0];
    assert_eq!(latest.version, 2);
    assert_eq!(latest.total_amount, 280_000);
    assert_eq!(latest.shop_name.as_deref(), Some("스피드메이트 강남점"));
    assert_eq!(latest.car.as_ref().map(|car| car.model.as_str()), Some("아반떼"));
    assert_eq!(
        latest.result.badges.as_deref(),
        Some(&["브레이크 패드 과다".to_string()][..])
    );
}

#[test]
fn recent_others_excludes_the_caller_and_hides_badges() {
    let (service, _) = build_service();
    let me = user("user_1");
    let mine = estimate_with_items(&service, &me, vec![oil_item(45_000)]);
    service.request_judgement(&mine.id).expect("judged");

    for _ in 0..3 {
        let theirs = estimate_with_items(&service, &user("user_2"), vec![brake_item(150_000)]);
        service.request_judgement(&theirs.id).expect("judged");
    }

    let recent = service.recent_others(&me, 2).expect("recent listed");
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().all(|entry| entry.estimate_id != mine.id));
    assert!(recent.iter().all(|entry| entry.result.badges.is_none()));
    assert!(recent[0].created_at >= recent[1].created_at);
}

#[test]
fn repository_outages_propagate() {
    let service = EstimateService::new(
        Arc::new(UnavailableRepository),
        Arc::new(JudgementEngine::standard()),
    );

    match service.list_cars(&user("user_1")) {
        Err(EstimateServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable error, got {other:?}"),
    }
}
