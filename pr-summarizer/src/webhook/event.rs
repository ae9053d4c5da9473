//! `pull_request` webhook payload (subset of fields we actually use).

use serde::Deserialize;

use crate::errors::MrResult;
use crate::git_providers::PullRequestRef;

/// Event name GitHub sends in `X-GitHub-Event` for pull request activity.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// A validated, interesting pull request delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub event_type: String,
    pub action: String,
    /// "owner/repo"
    pub repository: String,
    pub number: u64,
    pub sender: Option<String>,
}

impl WebhookEvent {
    /// Builds the event from a decoded payload.
    pub fn from_payload(event_type: &str, payload: PullRequestPayload) -> Self {
        Self {
            event_type: event_type.to_string(),
            action: payload.action,
            repository: payload.repository.full_name,
            number: payload.pull_request.number,
            sender: payload.sender.map(|s| s.login),
        }
    }

    /// Where the diff comes from and where the comment goes.
    pub fn pull_request(&self) -> MrResult<PullRequestRef> {
        PullRequestRef::from_full_name(&self.repository, self.number)
    }
}

#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    pub pull_request: PullRequestInfo,
    pub repository: RepositoryInfo,
    #[serde(default)]
    pub sender: Option<SenderInfo>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SenderInfo {
    pub login: String,
}
