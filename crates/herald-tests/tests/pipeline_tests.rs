//! End-to-end message pipeline tests against a mocked Telegram endpoint.

use herald_nats::BusMetrics;
use herald_nats::subscriber::handle_message;
use herald_tests::helpers::{TEST_CHAT_ID, TEST_SEND_PATH, telegram_sender};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_telegram(expected_text: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEST_SEND_PATH))
        .and(body_json(json!({
            "chat_id": TEST_CHAT_ID,
            "text": expected_text,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_created_event_reaches_telegram() {
    let server = mock_telegram("Todo created: Buy milk").await;
    let sender = telegram_sender(&server.uri());
    let metrics = BusMetrics::new();

    handle_message(
        br#"{"event":"todo_created","title":"Buy milk"}"#,
        &sender,
        &metrics,
    )
    .await;

    assert_eq!(metrics.snapshot().notifications_sent, 1);
}

#[tokio::test]
async fn test_done_event_reaches_telegram() {
    let server = mock_telegram("Todo marked done (id=7)").await;
    let sender = telegram_sender(&server.uri());
    let metrics = BusMetrics::new();

    handle_message(br#"{"event":"todo_done","todoId":7}"#, &sender, &metrics).await;

    assert_eq!(metrics.snapshot().notifications_sent, 1);
}

#[tokio::test]
async fn test_unknown_event_forwards_raw_payload() {
    let server = mock_telegram(r#"Todo event: {"event":"todo_archived"}"#).await;
    let sender = telegram_sender(&server.uri());
    let metrics = BusMetrics::new();

    handle_message(br#"{"event":"todo_archived"}"#, &sender, &metrics).await;

    assert_eq!(metrics.snapshot().notifications_sent, 1);
}

#[tokio::test]
async fn test_malformed_payload_makes_no_outbound_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sender = telegram_sender(&server.uri());
    let metrics = BusMetrics::new();

    handle_message(b"not-json", &sender, &metrics).await;

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.decode_failures, 1);
    assert_eq!(snapshot.notifications_sent, 0);
    assert_eq!(snapshot.notification_failures, 0);
}

#[tokio::test]
async fn test_rejected_delivery_is_dropped_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEST_SEND_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let sender = telegram_sender(&server.uri());
    let metrics = BusMetrics::new();

    handle_message(
        br#"{"event":"todo_created","title":"Buy milk"}"#,
        &sender,
        &metrics,
    )
    .await;

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.notification_failures, 1);
    assert_eq!(snapshot.notifications_sent, 0);
}
