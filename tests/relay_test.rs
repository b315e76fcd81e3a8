//! End-to-end relay tests: full router and reqwest client against a local
//! GitHub stand-in.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header::CONTENT_LENGTH, header::CONTENT_TYPE},
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};
use tower::ServiceExt;
use zoom_dispatch_relay::{
    application::usecases::zoom_webhook::ZoomWebhookUseCase,
    config::{config_loader, config_model::DotEnvyConfig},
    infrastructure::{axum_http::http_serve, github::repository_dispatch::GitHubDispatchClient},
};

const DISPATCH_PATH: &str = "/repos/acme/recordings/dispatches";

fn config_for(server: &ServerGuard, secret: Option<&str>, body_limit_mb: u64) -> DotEnvyConfig {
    let base_url = server.url();
    config_loader::from_lookup(|key| match key {
        "GITHUB_OWNER" => Some("acme".to_string()),
        "GITHUB_REPO" => Some("recordings".to_string()),
        "GITHUB_TOKEN" => Some("ghp_test".to_string()),
        "GITHUB_API_BASE_URL" => Some(base_url.clone()),
        "SERVER_BODY_LIMIT" => Some(body_limit_mb.to_string()),
        "ZOOM_WEBHOOK_SECRET_TOKEN" => secret.map(str::to_string),
        _ => None,
    })
    .unwrap()
}

fn relay(config: &DotEnvyConfig) -> Router {
    let client = GitHubDispatchClient::new(&config.github).unwrap();
    let usecase = Arc::new(ZoomWebhookUseCase::new(
        Arc::new(client),
        config.zoom.webhook_secret_token.clone(),
    ));
    http_serve::app(usecase, config.server.body_limit)
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "Failed to parse response as JSON: {e}\nBody: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

#[tokio::test]
async fn recording_completed_reaches_github_with_normalized_payload() {
    let mut server = Server::new_async().await;
    let github = server
        .mock("POST", DISPATCH_PATH)
        .match_header("authorization", "Bearer ghp_test")
        .match_header("accept", "application/vnd.github.v3+json")
        .match_body(Matcher::Json(json!({
            "event_type": "zoom_recording_completed",
            "client_payload": {
                "meeting_uuid": "test-uuid-12345",
                "meeting_topic": "Untitled Meeting",
                "duration": 0,
                "host_email": "test@example.com"
            }
        })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let response = relay(&config_for(&server, None, 1))
        .oneshot(post_json(json!({
            "event": "recording.completed",
            "payload": {
                "object": {
                    "uuid": "test-uuid-12345",
                    "host_email": "test@example.com"
                }
            }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({
            "success": true,
            "message": "GitHub Actions triggered",
            "meeting_uuid": "test-uuid-12345"
        })
    );
    github.assert_async().await;
}

#[tokio::test]
async fn github_rejection_is_surfaced_with_upstream_text() {
    let mut server = Server::new_async().await;
    let github = server
        .mock("POST", DISPATCH_PATH)
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .expect(1)
        .create_async()
        .await;

    let response = relay(&config_for(&server, None, 1))
        .oneshot(post_json(json!({
            "event": "recording.completed",
            "payload": { "object": { "uuid": "u1" } }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response_json(response).await,
        json!({
            "success": false,
            "error": "Failed to trigger GitHub Actions",
            "details": r#"{"message":"Bad credentials"}"#
        })
    );
    github.assert_async().await;
}

#[tokio::test]
async fn validation_and_unknown_events_never_call_github() {
    let mut server = Server::new_async().await;
    let github = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = relay(&config_for(&server, Some("zoom_secret"), 1));

    let response = app
        .clone()
        .oneshot(post_json(json!({
            "event": "endpoint.url_validation",
            "payload": { "plainToken": "abc", "encryptedToken": "ignored" }
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["plainToken"], "abc");
    assert_ne!(json["encryptedToken"], "ignored");
    assert_eq!(json["encryptedToken"].as_str().unwrap().len(), 64);

    let response = app
        .oneshot(post_json(json!({ "event": "meeting.started", "payload": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    github.assert_async().await;
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = Server::new_async().await;
    let oversized = vec![b' '; 1024 * 1024 + 1];

    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, oversized.len())
        .body(Body::from(oversized))
        .unwrap();

    let response = relay(&config_for(&server, None, 1))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn configured_limit_above_two_mib_accepts_large_bodies() {
    let mut server = Server::new_async().await;
    let github = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let body = json!({
        "event": "meeting.started",
        "payload": { "pad": "x".repeat(3 * 1024 * 1024) }
    })
    .to_string();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let response = relay(&config_for(&server, None, 8))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    github.assert_async().await;
}
