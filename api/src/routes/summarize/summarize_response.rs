use pr_summarizer::ManualSummary;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    /// "owner/repo#number"
    pub pull_request: String,
    pub summary: String,
    pub chunks: usize,
    pub failed_chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_url: Option<String>,
}

impl From<ManualSummary> for SummarizeResponse {
    fn from(m: ManualSummary) -> Self {
        let (comment_id, comment_url) = match m.comment {
            Some(c) => (Some(c.id), c.html_url),
            None => (None, None),
        };
        Self {
            pull_request: m.pr.to_string(),
            summary: m.summary,
            chunks: m.chunks,
            failed_chunks: m.failed_chunks,
            comment_id,
            comment_url,
        }
    }
}
