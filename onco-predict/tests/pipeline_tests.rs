//! Pipeline-level integration tests (no HTTP)
//!
//! Exercises the pipeline against the SQLite store with a counting fake
//! classifier.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use helpers::{jpeg_bytes, FakeClassifier};
use onco_predict::models::Label;
use onco_predict::pipeline::policy::ClassificationPolicy;
use onco_predict::store::{PredictionStore, SqlitePredictionStore};
use onco_predict::{ApiError, HistoryAccessor, PredictionError, PredictionPipeline};

async fn sqlite_store() -> Arc<SqlitePredictionStore> {
    let pool = onco_common::db::init_memory_database().await.unwrap();
    Arc::new(SqlitePredictionStore::new(pool))
}

#[tokio::test]
async fn test_two_megabyte_zero_buffer_is_input_error() {
    let classifier = FakeClassifier::new(vec![0.9]);
    let store = sqlite_store().await;
    let pipeline = PredictionPipeline::new(
        classifier.clone(),
        store.clone(),
        ClassificationPolicy::default(),
    );

    let err = pipeline.submit(vec![0u8; 2_000_000]).await.unwrap_err();
    assert!(matches!(err, PredictionError::ImageTooLarge { size: 2_000_000 }));

    let api_err = ApiError::from(err);
    assert_eq!(api_err.status(), StatusCode::BAD_REQUEST);
    assert!(api_err.to_string().contains("maximum 1MB"));

    assert_eq!(classifier.calls(), 0);
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_record_round_trips_through_history() {
    let store = sqlite_store().await;
    let pipeline = PredictionPipeline::new(
        FakeClassifier::new(vec![0.005]),
        store.clone(),
        ClassificationPolicy::default(),
    );
    let history = HistoryAccessor::new(store);

    let outcome = pipeline.submit(jpeg_bytes()).await.unwrap();
    let view = history.get_one(&outcome.record.id).await.unwrap().unwrap();

    assert_eq!(outcome.record.result, Label::NonCancer);
    assert_eq!(view.id, outcome.record.id);
    assert_eq!(view.history.id, outcome.record.id);
    assert_eq!(view.history.result, outcome.record.result);
    assert_eq!(view.history.suggestion, outcome.record.suggestion);
    assert_eq!(view.history.created_at, outcome.record.created_at);
}

#[tokio::test]
async fn test_configured_threshold_changes_label() {
    let store = sqlite_store().await;
    // 0.3 -> score 30
    let pipeline = PredictionPipeline::new(
        FakeClassifier::new(vec![0.3]),
        store,
        ClassificationPolicy::new(50.0),
    );

    let outcome = pipeline.submit(jpeg_bytes()).await.unwrap();

    assert_eq!(pipeline.policy().threshold(), 50.0);
    assert_eq!(outcome.record.result, Label::NonCancer);
}

#[tokio::test]
async fn test_concurrent_submissions_share_model_and_store() {
    let classifier = FakeClassifier::new(vec![0.8]);
    let store = sqlite_store().await;
    let pipeline = Arc::new(PredictionPipeline::new(
        classifier.clone(),
        store.clone(),
        ClassificationPolicy::default(),
    ));

    let image = jpeg_bytes();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            let image = image.clone();
            tokio::spawn(async move { pipeline.submit(image).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        ids.insert(outcome.record.id);
    }

    assert_eq!(ids.len(), 8);
    assert_eq!(classifier.calls(), 8);
    assert_eq!(store.list().await.unwrap().len(), 8);
}
