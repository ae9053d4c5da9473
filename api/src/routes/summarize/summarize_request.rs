use serde::Deserialize;

/// Request body for a manual summary.
///
/// Signed like a webhook delivery (`X-Hub-Signature-256` over the raw body).
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// `https://github.com/{owner}/{repo}/pull/{number}`
    pub pr_url: String,
    /// Post the summary as a PR comment as well as returning it.
    #[serde(default)]
    pub post_comment: bool,
}
