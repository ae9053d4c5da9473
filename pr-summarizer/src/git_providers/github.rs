//! GitHub provider (REST v3): pull request diff + issue comments.
//!
//! Endpoints used:
//! - GET  /repos/{owner}/{repo}/pulls/{number}            (Accept: application/vnd.github.v3.diff)
//! - POST /repos/{owner}/{repo}/issues/{number}/comments  (PR conversation comment)

use std::time::Instant;

use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Serialize;
use tracing::debug;

use crate::errors::{ConfigError, ProviderError};
use crate::git_providers::ProviderConfig;
use crate::git_providers::types::*;

const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str = "pr-summarizer/0.1";

#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // "https://api.github.com"
    token: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_api", &self.base_api)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    /// Constructs a GitHub client with its own reqwest instance.
    ///
    /// # Errors
    /// [`ConfigError::InvalidBaseUrl`] if `base_api` is not http(s);
    /// [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, ConfigError> {
        let base = cfg.base_api.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(cfg.base_api.clone()));
        }
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::new(http, base.trim_end_matches('/').to_string(), cfg.token.clone()))
    }

    /// Constructs a GitHub client with a shared reqwest instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        Self {
            http,
            base_api,
            token,
        }
    }

    /// Fetches the unified diff of a pull request.
    pub async fn get_diff(&self, pr: &PullRequestRef) -> Result<DiffPayload, ProviderError> {
        let started = Instant::now();
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_api, pr.owner, pr.repo, pr.number
        );
        debug!(%pr, %url, "github: GET diff");

        let text = self
            .http
            .get(url)
            .header(ACCEPT, DIFF_MEDIA_TYPE)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!(
            %pr,
            diff_len = text.len(),
            latency_ms = started.elapsed().as_millis(),
            "github: diff fetched"
        );
        Ok(DiffPayload { text })
    }

    /// Creates a conversation comment on the pull request.
    pub async fn create_comment(
        &self,
        pr: &PullRequestRef,
        body: &str,
    ) -> Result<PostedComment, ProviderError> {
        #[derive(Serialize)]
        struct Req<'a> {
            body: &'a str,
        }

        let started = Instant::now();
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_api, pr.owner, pr.repo, pr.number
        );
        debug!(%pr, %url, body_len = body.len(), "github: POST comment");

        let posted: PostedComment = self
            .http
            .post(url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&Req { body })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            %pr,
            comment_id = posted.id,
            latency_ms = started.elapsed().as_millis(),
            "github: comment created"
        );
        Ok(posted)
    }
}
