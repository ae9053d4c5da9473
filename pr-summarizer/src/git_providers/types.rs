//! Provider data model for pull requests, diffs and comments.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{Error, MrResult};

/// A unique reference to a pull request inside a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestRef {
    /// Builds a reference from GitHub's `repository.full_name` ("owner/repo").
    ///
    /// # Errors
    /// [`Error::Validation`] if `full_name` is not exactly two valid path segments.
    pub fn from_full_name(full_name: &str, number: u64) -> MrResult<Self> {
        let (owner, repo) = full_name
            .split_once('/')
            .ok_or_else(|| Error::Validation(format!("repository `{full_name}` is not owner/repo")))?;
        Self::new(owner, repo, number)
    }

    /// Builds a reference, validating owner and repo names.
    pub fn new(owner: &str, repo: &str, number: u64) -> MrResult<Self> {
        for (what, seg) in [("owner", owner), ("repo", repo)] {
            if !is_valid_segment(seg) {
                return Err(Error::Validation(format!("invalid {what} name: `{seg}`")));
            }
        }
        if number == 0 {
            return Err(Error::Validation("pull request number must be positive".into()));
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }

    /// "owner/repo"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// GitHub owner/repo names: ASCII alphanumerics plus `-`, `_`, `.`; never `.`/`..`.
fn is_valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Parses a pull request web URL: `https://github.com/{owner}/{repo}/pull/{number}`.
///
/// # Errors
/// [`Error::Validation`] when the host is not `github.com` or the path does
/// not have exactly the four expected segments.
pub fn parse_pr_url(raw: &str) -> MrResult<PullRequestRef> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Validation(format!("invalid pull request URL: {e}")))?;

    if url.host_str() != Some("github.com") {
        return Err(Error::Validation("invalid GitHub URL: host must be github.com".into()));
    }

    let parts: Vec<&str> = url
        .path()
        .trim_matches('/')
        .split('/')
        .collect();
    match parts.as_slice() {
        [owner, repo, "pull", number] => {
            let number = number.parse::<u64>().map_err(|_| {
                Error::Validation(format!("pull request number `{number}` is not a number"))
            })?;
            PullRequestRef::new(owner, repo, number)
        }
        _ => Err(Error::Validation(
            "URL must be a GitHub pull request URL (owner/repo/pull/number)".into(),
        )),
    }
}

/// Raw unified diff of a pull request as returned by the provider.
#[derive(Debug, Clone)]
pub struct DiffPayload {
    pub text: String,
}

impl DiffPayload {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A comment created on the pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedComment {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}
