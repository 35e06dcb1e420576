//! `FieldbookClient` against a mock Fieldbook API.

mod common;

use common::{config_toml, record, MockFieldbook};
use webwords::config::parse_config;
use webwords::fieldbook::FieldbookClient;
use webwords_core::sync::{pull, push};
use webwords_core::{LearningStatus, RecordId, RecordStore, SyncError, WordRegistry};

fn client(base_url: &str, max_retries: u32) -> FieldbookClient {
    let cfg = parse_config(&config_toml(base_url, max_retries)).unwrap();
    FieldbookClient::new(&cfg.fieldbook).unwrap()
}

#[tokio::test]
async fn fetch_applies_remote_status_and_id() {
    let mock = MockFieldbook::with_records(vec![record(1, "fish", "known")]);
    let base = mock.serve().await;
    let client = client(&base, 0);

    let mut registry = WordRegistry::default();
    let applied = pull(&client, &mut registry).await.unwrap();
    assert_eq!(applied, 1);

    let fish = registry.get("fish").unwrap();
    assert_eq!(fish.learning_status(), LearningStatus::Known);
    assert_eq!(fish.remote_record_id(), Some(RecordId(1)));
}

#[tokio::test]
async fn upsert_posts_new_words_then_puts_updates() {
    let mock = MockFieldbook::with_records(vec![record(1, "fish", "known")]);
    let base = mock.serve().await;
    let client = client(&base, 0);

    let mut registry = WordRegistry::default();
    let owl = registry.resolve_text("Owl", Some(LearningStatus::Unknown));

    let id = push(&client, &owl).await.unwrap();
    assert_eq!(id, RecordId(2));
    assert_eq!(owl.remote_record_id(), Some(RecordId(2)));

    owl.mark_as_known();
    let again = push(&client, &owl).await.unwrap();
    assert_eq!(again, RecordId(2));

    let records = mock.snapshot();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["word"], "owl");
    assert_eq!(records[1]["how_well_known"], "known");
}

#[tokio::test]
async fn wrong_credentials_fail_without_retry() {
    let mock = MockFieldbook::default();
    let base = mock.serve().await;
    let toml = config_toml(&base, 3).replace("test-secret", "wrong");
    let cfg = parse_config(&toml).unwrap();
    let client = FieldbookClient::new(&cfg.fieldbook).unwrap();

    let err = client.fetch_all_records().await.unwrap_err();
    assert!(matches!(err, SyncError::Http { status: 401, .. }));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn server_error_is_retried() {
    let mock = MockFieldbook::with_records(vec![record(1, "fish", "unknown")]).failing(503, 1);
    let base = mock.serve().await;
    let client = client(&base, 1);

    let records = client.fetch_all_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn retries_exhausted_returns_last_error() {
    let mock = MockFieldbook::default().failing(500, 10);
    let base = mock.serve().await;
    let client = client(&base, 0);

    let err = client.fetch_all_records().await.unwrap_err();
    match err {
        SyncError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "injected failure");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let mock = MockFieldbook {
        junk: true,
        ..MockFieldbook::default()
    };
    let base = mock.serve().await;
    let client = client(&base, 0);

    let err = client.fetch_all_records().await.unwrap_err();
    assert!(matches!(err, SyncError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = client(&format!("http://127.0.0.1:{}/v1", port), 0);

    let err = client.fetch_all_records().await.unwrap_err();
    assert!(matches!(err, SyncError::Transport(_)));
}

#[tokio::test]
async fn failed_push_keeps_local_status() {
    let mock = MockFieldbook::default().failing(403, 1);
    let base = mock.serve().await;
    let client = client(&base, 2);

    let mut registry = WordRegistry::default();
    let word = registry.resolve_text("lynx", None);
    word.mark_as_unknown();

    assert!(push(&client, &word).await.is_err());
    assert_eq!(word.learning_status(), LearningStatus::Unknown);
    assert_eq!(word.remote_record_id(), None);
    assert!(mock.snapshot().is_empty());
}
