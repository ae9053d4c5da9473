//! In-process fake of the GitHub REST API and the chat-completions API.
//!
//! One server serves both, so a test points `GITHUB_API_BASE` and
//! `FIREWORKS_URL` at the same address. Every call is recorded in order.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

pub const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n\
--- a/src/lib.rs\n\
+++ b/src/lib.rs\n\
@@ -1,3 +1,4 @@\n\
+pub fn added() {}\n\
 fn kept() {}\n";

pub const MODEL_SUMMARY: &str = "## Summary\nAdds a helper.\n\
## Key Changes\n- `added()`\n\
## Potential Risks\nNone identified\n\
## Verification\nRun the tests.\n\
## Files Changed\n- src/lib.rs";

/// How the fake answers.
#[derive(Clone)]
pub struct Behavior {
    pub diff_status: StatusCode,
    pub diff: String,
    /// Completion replies by call index; the last entry repeats.
    pub completions: Vec<Result<String, StatusCode>>,
    /// Applied before every completion reply.
    pub completion_delay: Option<Duration>,
    pub comment_status: StatusCode,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            diff_status: StatusCode::OK,
            diff: DIFF.to_string(),
            completions: vec![Ok(MODEL_SUMMARY.to_string())],
            completion_delay: None,
            comment_status: StatusCode::CREATED,
        }
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub comments: Arc<Mutex<Vec<String>>>,
    pub github_auth: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct Fake {
    behavior: Arc<Behavior>,
    rec: Recorder,
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn get_pull(
    State(fake): State<Fake>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    fake.rec
        .calls
        .lock()
        .unwrap()
        .push(format!("GET diff {owner}/{repo}#{number}"));
    fake.rec
        .github_auth
        .lock()
        .unwrap()
        .push(header(&headers, "authorization"));
    assert_eq!(header(&headers, "accept"), "application/vnd.github.v3.diff");

    if fake.behavior.diff_status.is_success() {
        (StatusCode::OK, fake.behavior.diff.clone())
    } else {
        (fake.behavior.diff_status, r#"{"message":"Not Found"}"#.to_string())
    }
}

async fn post_comment(
    State(fake): State<Fake>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    fake.rec
        .calls
        .lock()
        .unwrap()
        .push(format!("POST comment {owner}/{repo}#{number}"));
    let text = body["body"].as_str().unwrap_or_default().to_string();
    fake.rec.comments.lock().unwrap().push(text);

    if fake.behavior.comment_status.is_success() {
        (
            fake.behavior.comment_status,
            Json(json!({
                "id": 1001,
                "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}#issuecomment-1001")
            })),
        )
    } else {
        (
            fake.behavior.comment_status,
            Json(json!({"message": "Resource not accessible by integration"})),
        )
    }
}

async fn completion(State(fake): State<Fake>, Json(body): Json<Value>) -> impl IntoResponse {
    let idx = {
        let mut prompts = fake.rec.prompts.lock().unwrap();
        prompts.push(
            body["messages"][0]["content"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        );
        prompts.len() - 1
    };
    fake.rec.calls.lock().unwrap().push("POST completion".into());
    if let Some(delay) = fake.behavior.completion_delay {
        tokio::time::sleep(delay).await;
    }

    let replies = &fake.behavior.completions;
    let reply = replies
        .get(idx)
        .or_else(|| replies.last())
        .cloned()
        .unwrap_or(Err(StatusCode::INTERNAL_SERVER_ERROR));

    match reply {
        Ok(content) => (
            StatusCode::OK,
            Json(json!({"choices": [{"message": {"role": "assistant", "content": content}}]})),
        ),
        Err(status) => (status, Json(json!({"error": "upstream exploded"}))),
    }
}

/// Starts the fake and returns its base URL.
pub async fn spawn(behavior: Behavior) -> (String, Recorder) {
    let rec = Recorder::default();
    let state = Fake {
        behavior: Arc::new(behavior),
        rec: rec.clone(),
    };
    let app = Router::new()
        .route("/repos/{owner}/{repo}/pulls/{number}", get(get_pull))
        .route(
            "/repos/{owner}/{repo}/issues/{number}/comments",
            post(post_comment),
        )
        .route("/v1/chat/completions", post(completion))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), rec)
}

/// Environment pointing every upstream at `base`.
pub fn env(base: &str) -> impl Fn(&str) -> Option<String> + use<> {
    env_with(base, &[])
}

/// Like [`env`], with `overrides` taking precedence.
pub fn env_with(
    base: &str,
    overrides: &[(&'static str, &'static str)],
) -> impl Fn(&str) -> Option<String> + use<> {
    let base = base.to_string();
    let overrides = overrides.to_vec();
    move |k: &str| {
        if let Some((_, v)) = overrides.iter().find(|(name, _)| *name == k) {
            return Some(v.to_string());
        }
        let v = match k {
            "GITHUB_TOKEN" => "gh-test-token",
            "GITHUB_WEBHOOK_SECRET" => "hook-secret",
            "FIREWORKS_API_KEY" => "fw-test-key",
            "GITHUB_API_BASE" | "FIREWORKS_URL" => base.as_str(),
            "LLM_TIMEOUT_SECS" => "5",
            "PR_SUMMARY_CHUNK_CHARS" => "64",
            _ => return None,
        };
        Some(v.to_string())
    }
}
