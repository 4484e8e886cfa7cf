//! WebhookSink against a real HTTP server.

mod common;

use std::sync::Arc;

use cluster_notify::adapters::{ReqwestHttpClient, WebhookSink};
use cluster_notify::models::NotificationPayload;
use cluster_notify::traits::{NotificationSink, SinkError, TlsPolicy};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sink_at(base_url: &str) -> WebhookSink {
    let http = ReqwestHttpClient::new(TlsPolicy::Verify).expect("client builds");
    WebhookSink::new(Arc::new(http), format!("{}/services/T0/B0", base_url))
}

fn sink_for(server: &MockServer) -> WebhookSink {
    sink_at(&server.uri())
}

#[tokio::test]
async fn test_posts_file_notification_as_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/T0/B0"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "text": "📄 *New file* `report.csv` in `/proj/out`\n```a,b\n1,2```"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = NotificationPayload::new_file("report.csv", "/proj/out", "a,b\n1,2");
    sink_for(&mock_server).deliver(&payload).await.unwrap();
}

#[tokio::test]
async fn test_posts_directory_notification() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({
            "text": "📂 *New directory created* `batch-7` in `/proj`\n"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = NotificationPayload::new_directory("batch-7", "/proj");
    sink_for(&mock_server).deliver(&payload).await.unwrap();
}

#[tokio::test]
async fn test_non_200_reply_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = NotificationPayload::new_directory("d", "/");
    let err = sink_for(&mock_server).deliver(&payload).await.unwrap_err();

    match err {
        SinkError::Rejected { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no_service");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_webhook_is_transport_error() {
    let sink = sink_at(&common::unused_local_url());

    let err = sink
        .deliver(&NotificationPayload::new_directory("d", "/"))
        .await
        .unwrap_err();
    assert!(matches!(err, SinkError::Transport(_)));
}
