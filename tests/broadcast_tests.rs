//! End-to-end tests for the scheduled broadcast Lambda.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{RecordingClient, body_of, http_event, status_of};
use newsrelay::ConfigError;
use newsrelay::broadcast::{
    BroadcastOutcome, Broadcaster, NOTHING_TO_POST_MESSAGE, handle_request,
};
use newsrelay::core::config::BroadcastConfig;
use newsrelay::core::models::Destination;
use newsrelay::telegram::TextMode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn broadcaster(server: &MockServer, client: &Arc<RecordingClient>, category: &str) -> Broadcaster {
    let map: HashMap<String, String> = HashMap::from([
        ("TELEGRAM_BOT_TOKEN".to_string(), "123:test-token".to_string()),
        ("TELEGRAM_CHANNEL_ID".to_string(), "@headlines".to_string()),
        (
            "BROADCAST_NEWS_API_URL".to_string(),
            format!("{}/news", server.uri()),
        ),
        ("BROADCAST_CATEGORY".to_string(), category.to_string()),
    ]);
    let config =
        BroadcastConfig::from_lookup(|key| map.get(key).cloned()).expect("valid test config");
    Broadcaster::new(&config, client.clone())
}

fn one_headline() -> serde_json::Value {
    json!({
        "data": [{
            "title": "Budget passed",
            "content": "Parliament approved the budget.",
            "readMoreUrl": "https://example.test/budget",
            "author": "Desk"
        }]
    })
}

#[tokio::test]
async fn test_post_pushes_first_headline_to_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("category", "politics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_headline()))
        .expect(1)
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::new());
    let b = broadcaster(&server, &client, "politics");

    let response = handle_request(Ok(&b), &http_event("POST", None)).await;

    assert_eq!(status_of(&response), 200);
    assert_eq!(body_of(&response)["title"], "Budget passed");
    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].destination,
        Destination::Channel("@headlines".to_string())
    );
    assert_eq!(sent[0].mode, TextMode::Html);
    assert!(sent[0].disable_link_preview);
    assert!(sent[0].text.starts_with("<b>Budget passed</b>"));
}

#[tokio::test]
async fn test_non_post_rejected_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_headline()))
        .expect(0)
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::new());
    let b = broadcaster(&server, &client, "all");

    for verb in ["GET", "PUT", "DELETE"] {
        let response = handle_request(Ok(&b), &http_event(verb, None)).await;
        assert_eq!(status_of(&response), 405, "{verb} must be rejected");
    }
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn test_missing_config_returns_server_error() {
    let err = ConfigError::Missing("TELEGRAM_CHANNEL_ID");

    let response = handle_request(Err(&err), &http_event("POST", None)).await;

    assert_eq!(status_of(&response), 500);
}

#[tokio::test]
async fn test_empty_data_is_success_with_nothing_to_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::new());
    let b = broadcaster(&server, &client, "all");

    let response = handle_request(Ok(&b), &http_event("POST", None)).await;

    assert_eq!(status_of(&response), 200);
    assert_eq!(body_of(&response)["message"], NOTHING_TO_POST_MESSAGE);
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn test_upstream_status_and_body_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::new());
    let b = broadcaster(&server, &client, "all");

    let response = handle_request(Ok(&b), &http_event("POST", None)).await;

    assert_eq!(status_of(&response), 502);
    assert_eq!(body_of(&response)["details"], "upstream exploded");
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn test_send_failure_returns_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_headline()))
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::failing());
    let b = broadcaster(&server, &client, "all");

    let response = handle_request(Ok(&b), &http_event("POST", None)).await;

    assert_eq!(status_of(&response), 500);
}

#[tokio::test]
async fn test_scheduled_event_triggers_broadcast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_headline()))
        .expect(1)
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::new());
    let b = broadcaster(&server, &client, "all");
    let event = json!({
        "version": "0",
        "source": "aws.events",
        "detail-type": "Scheduled Event",
        "detail": {}
    });

    let response = handle_request(Ok(&b), &event).await;

    assert_eq!(status_of(&response), 200);
    assert_eq!(client.sent().len(), 1);
}

#[tokio::test]
async fn test_repeated_triggers_repost_same_headline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_headline()))
        .expect(2)
        .mount(&server)
        .await;
    let client = Arc::new(RecordingClient::new());
    let b = broadcaster(&server, &client, "all");

    let first = b.broadcast().await.unwrap();
    let second = b.broadcast().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        BroadcastOutcome::Posted {
            title: Some("Budget passed".to_string())
        }
    );
    let texts = client.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], texts[1], "No dedup between runs");
}
