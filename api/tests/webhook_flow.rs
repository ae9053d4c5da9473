//! Router-level checks: status codes, envelope shape and upstream call order.

mod common;

use std::sync::Arc;

use api::{
    build_router,
    core::app_state::{AppConfig, AppState},
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use pr_summarizer::webhook::sign;
use serde_json::Value;
use tower::ServiceExt;

use common::{Behavior, Recorder};

const SECRET: &[u8] = b"hook-secret";
const OPENED: &str =
    r#"{"action":"opened","pull_request":{"number":6},"repository":{"full_name":"A/B"}}"#;
const CLOSED: &str =
    r#"{"action":"closed","pull_request":{"number":6},"repository":{"full_name":"A/B"}}"#;

async fn app(behavior: Behavior) -> (Router, Recorder) {
    let (base, rec) = common::spawn(behavior).await;
    let cfg = AppConfig::from_lookup(common::env(&base)).unwrap();
    let state = Arc::new(AppState::new(&cfg).unwrap());
    (build_router(state), rec)
}

fn delivery(event: &str, body: &str, signature: Option<String>) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-github-event", event)
        .header("x-github-delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958");
    if let Some(sig) = signature {
        req = req.header("x-hub-signature-256", sig);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn opened_pr_gets_a_summary_comment() {
    let (app, rec) = app(Behavior::default()).await;
    let sig = sign(OPENED.as_bytes(), SECRET);

    let (status, body) = send(app, delivery("pull_request", OPENED, Some(sig))).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "Summary posted");
    assert_eq!(body["data"]["comment_id"], 1001);
    assert_eq!(
        rec.calls(),
        ["GET diff A/B#6", "POST completion", "POST comment A/B#6"]
    );
    let comment = &rec.comments()[0];
    for section in ["Summary", "Key Changes", "Potential Risks", "Verification", "Files Changed"] {
        assert!(comment.contains(section), "comment lacks {section}");
    }
}

#[tokio::test]
async fn closed_pr_is_ignored() {
    let (app, rec) = app(Behavior::default()).await;
    let sig = sign(CLOSED.as_bytes(), SECRET);

    let (status, body) = send(app, delivery("pull_request", CLOSED, Some(sig))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Ignored action: closed");
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn other_events_are_ignored() {
    let (app, rec) = app(Behavior::default()).await;
    let body = r#"{"zen":"Keep it logically awesome."}"#;
    let sig = sign(body.as_bytes(), SECRET);

    let (status, json) = send(app, delivery("ping", body, Some(sig))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "Ignored event: ping");
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn bad_or_missing_signature_is_forbidden() {
    let (app, rec) = app(Behavior::default()).await;

    let forged = sign(OPENED.as_bytes(), b"not-the-secret");
    let (status, body) = send(app.clone(), delivery("pull_request", OPENED, Some(forged))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_SIGNATURE");

    let (status, body) = send(app, delivery("pull_request", OPENED, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "MISSING_SIGNATURE");

    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn malformed_pull_request_payload_is_bad_request() {
    let (app, rec) = app(Behavior::default()).await;
    let body = r#"{"action":"opened","repository":{"full_name":"A/B"}}"#;
    let sig = sign(body.as_bytes(), SECRET);

    let (status, json) = send(app, delivery("pull_request", body, Some(sig))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_PAYLOAD");
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn diff_not_found_is_bad_gateway_without_model_or_comment() {
    let (app, rec) = app(Behavior {
        diff_status: StatusCode::NOT_FOUND,
        ..Behavior::default()
    })
    .await;
    let sig = sign(OPENED.as_bytes(), SECRET);

    let (status, body) = send(app, delivery("pull_request", OPENED, Some(sig))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "FETCH_FAILED");
    assert_eq!(rec.calls(), ["GET diff A/B#6"]);
}

#[tokio::test]
async fn model_failure_is_bad_gateway_without_comment() {
    let (app, rec) = app(Behavior {
        completions: vec![Err(StatusCode::INTERNAL_SERVER_ERROR)],
        ..Behavior::default()
    })
    .await;
    let sig = sign(OPENED.as_bytes(), SECRET);

    let (status, body) = send(app, delivery("pull_request", OPENED, Some(sig))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "SUMMARIZE_FAILED");
    assert!(rec.comments().is_empty());
}

#[tokio::test]
async fn comment_failure_is_reported() {
    let (app, _rec) = app(Behavior {
        comment_status: StatusCode::FORBIDDEN,
        ..Behavior::default()
    })
    .await;
    let sig = sign(OPENED.as_bytes(), SECRET);

    let (status, body) = send(app, delivery("pull_request", OPENED, Some(sig))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "POST_FAILED");
}

fn summarize_request(body: &str, secret: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/summarize")
        .header("content-type", "application/json")
        .header("x-hub-signature-256", sign(body.as_bytes(), secret))
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn manual_summary_returns_chunks() {
    let (app, rec) = app(Behavior::default()).await;
    let body = r#"{"pr_url":"https://github.com/A/B/pull/6","post_comment":false}"#;

    let (status, json) = send(app, summarize_request(body, SECRET)).await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["pull_request"], "A/B#6");
    assert!(
        json["data"]["summary"]
            .as_str()
            .unwrap()
            .starts_with("**Chunk 1 Summary**:")
    );
    assert!(json["data"].get("comment_id").is_none());
    assert!(rec.comments().is_empty());
}

#[tokio::test]
async fn manual_summary_rejects_bad_input() {
    let (app, rec) = app(Behavior::default()).await;

    let body = r#"{"pr_url":"https://gitlab.com/A/B/pull/6"}"#;
    let (status, json) = send(app.clone(), summarize_request(body, SECRET)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

    let (status, json) = send(app.clone(), summarize_request("{", SECRET)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");

    let body = r#"{"pr_url":"https://github.com/A/B/pull/6"}"#;
    let (status, _) = send(app, summarize_request(body, b"wrong")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let (app, _rec) = app(Behavior::default()).await;

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");

    let req = Request::builder().uri("/nope").body(Body::empty()).unwrap();
    let (status, json) = send(app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}
