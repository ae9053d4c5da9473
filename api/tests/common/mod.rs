//! Minimal fake of the GitHub and chat-completions upstreams for router tests.
//!
//! Records the order of upstream calls and the posted comment bodies.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n\
--- a/src/lib.rs\n\
+++ b/src/lib.rs\n\
@@ -1,3 +1,4 @@\n\
+pub fn added() {}\n\
 fn kept() {}\n";

const MODEL_SUMMARY: &str = "## Summary\nAdds a helper.\n\
## Key Changes\n- `added()`\n\
## Potential Risks\nNone identified\n\
## Verification\nRun the tests.\n\
## Files Changed\n- src/lib.rs";

/// How the fake answers.
#[derive(Clone)]
pub struct Behavior {
    pub diff_status: StatusCode,
    /// Completion replies by call index; the last entry repeats.
    pub completions: Vec<Result<String, StatusCode>>,
    pub comment_status: StatusCode,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            diff_status: StatusCode::OK,
            completions: vec![Ok(MODEL_SUMMARY.to_string())],
            comment_status: StatusCode::CREATED,
        }
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    comments: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[derive(Clone)]
struct Fake {
    behavior: Arc<Behavior>,
    rec: Recorder,
}

async fn get_pull(
    State(fake): State<Fake>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
) -> (StatusCode, String) {
    fake.rec.record(format!("GET diff {owner}/{repo}#{number}"));
    if fake.behavior.diff_status.is_success() {
        (StatusCode::OK, DIFF.to_string())
    } else {
        (fake.behavior.diff_status, r#"{"message":"Not Found"}"#.to_string())
    }
}

async fn post_comment(
    State(fake): State<Fake>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.rec.record(format!("POST comment {owner}/{repo}#{number}"));
    let text = body["body"].as_str().unwrap_or_default().to_string();
    fake.rec.comments.lock().unwrap().push(text);

    let status = fake.behavior.comment_status;
    if status.is_success() {
        (status, Json(json!({"id": 1001})))
    } else {
        (status, Json(json!({"message": "Resource not accessible by integration"})))
    }
}

async fn completion(State(fake): State<Fake>) -> (StatusCode, Json<Value>) {
    let idx = {
        let mut calls = fake.rec.calls.lock().unwrap();
        let idx = calls.iter().filter(|c| *c == "POST completion").count();
        calls.push("POST completion".into());
        idx
    };

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
    let base = base.to_string();
    move |k: &str| {
        let v = match k {
            "GITHUB_TOKEN" => "gh-test-token",
            "GITHUB_WEBHOOK_SECRET" => "hook-secret",
            "FIREWORKS_API_KEY" => "fw-test-key",
            "GITHUB_API_BASE" | "FIREWORKS_URL" => base.as_str(),
            "LLM_TIMEOUT_SECS" => "5",
            _ => return None,
        };
        Some(v.to_string())
    }
}
