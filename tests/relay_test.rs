//! 中继流程端到端测试

mod common;

use common::{create_event, MockHub, RecordingSink};
use hub_relay::{Relay, RelayError, RelayOutcome, Rounding, SkipReason};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn test_model_with_full_metadata() {
    // Given: 元数据完整，README 简短
    let hub = Arc::new(MockHub::new(
        Some(json!({"safetensors": {"total": 7_000_000_000u64}, "cardData": {"license": "mit"}})),
        Some("A compact model for testing."),
    ));
    let sink = Arc::new(RecordingSink::new());
    let relay = Relay::new(hub.clone(), sink.clone());

    // When
    let outcome = relay.handle(&create_event("model", "acme/small-model")).await.unwrap();

    // Then
    assert_eq!(outcome, RelayOutcome::Delivered);
    assert_eq!(sink.count(), 1);

    let document = sink.last().unwrap();
    let embed = document.embed().unwrap();
    assert_eq!(embed.title, "acme/small-model");
    assert_eq!(embed.field("Type"), Some("Model"));
    assert_eq!(embed.field("Parameters"), Some("7B"));
    assert_eq!(embed.field("License"), Some("mit"));
    assert_eq!(embed.description, "A compact model for testing....");
    assert_eq!(embed.url, "https://huggingface.co/acme/small-model");
}

#[tokio::test]
async fn test_denylisted_repo_makes_no_requests() {
    let hub = Arc::new(MockHub::new(Some(json!({})), Some("docs")));
    let sink = Arc::new(RecordingSink::new());
    let relay = Relay::new(hub.clone(), sink.clone());

    let outcome = relay.handle(&create_event("model", "acme/model-gguf")).await.unwrap();

    assert_eq!(outcome, RelayOutcome::Skipped(SkipReason::Irrelevant { keyword: "gguf" }));
    assert_eq!(hub.total_calls(), 0);
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_missing_readme_still_notifies() {
    let hub = Arc::new(MockHub::new(Some(json!({"cardData": {"license": "apache-2.0"}})), None));
    let sink = Arc::new(RecordingSink::new());
    let relay = Relay::new(hub.clone(), sink.clone());

    let outcome = relay.handle(&create_event("dataset", "acme/corpus")).await.unwrap();

    assert_eq!(outcome, RelayOutcome::Delivered);
    let document = sink.last().unwrap();
    let embed = document.embed().unwrap();
    assert_eq!(embed.description, "...");
    assert_eq!(embed.field("Type"), Some("Dataset"));
    assert_eq!(embed.field("Parameters"), None);
    assert_eq!(embed.field("License"), Some("apache-2.0"));
    assert_eq!(hub.readme_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_metadata_failure_is_fatal_and_not_retried() {
    let hub = Arc::new(MockHub::new(None, Some("docs")));
    let sink = Arc::new(RecordingSink::new());
    let relay = Relay::new(hub.clone(), sink.clone());

    let err = relay.handle(&create_event("model", "acme/broken")).await.unwrap_err();

    assert!(matches!(err, RelayError::MetadataParse { .. }));
    assert_eq!(hub.metadata_calls.load(Ordering::SeqCst), 1);
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_delivery_failure_is_reported() {
    let hub = Arc::new(MockHub::new(Some(json!({})), Some("docs")));
    let sink = Arc::new(RecordingSink::rejecting(500));
    let relay = Relay::new(hub, sink.clone());

    let err = relay.handle(&create_event("space", "acme/demo")).await.unwrap_err();

    assert!(matches!(err, RelayError::Delivery { status: 500, .. }));
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_round_mode() {
    let hub = Arc::new(MockHub::new(Some(json!({"safetensors": {"total": 7_500_000}})), None));
    let sink = Arc::new(RecordingSink::new());
    let relay = Relay::new(hub, sink.clone()).with_rounding(Rounding::Round);

    relay.handle(&create_event("model", "acme/tiny")).await.unwrap();

    assert_eq!(sink.last().unwrap().embeds[0].field("Parameters"), Some("8M"));
}

#[tokio::test]
async fn test_private_and_non_create_events_skip_fetches() {
    let hub = Arc::new(MockHub::new(Some(json!({})), None));
    let sink = Arc::new(RecordingSink::new());
    let relay = Relay::new(hub.clone(), sink.clone());

    let mut private = create_event("model", "acme/secret");
    private.repo.private = true;
    assert_eq!(
        relay.handle(&private).await.unwrap(),
        RelayOutcome::Skipped(SkipReason::Private)
    );

    let mut update = create_event("model", "acme/small-model");
    update.event.action = "update".to_string();
    assert!(matches!(
        relay.handle(&update).await.unwrap(),
        RelayOutcome::Skipped(SkipReason::NotRepoCreation { .. })
    ));

    assert_eq!(hub.total_calls(), 0);
    assert_eq!(sink.count(), 0);
}
