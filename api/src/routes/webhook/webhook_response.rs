use serde::Serialize;

/// Body returned for a processed or intentionally ignored delivery.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Human-readable outcome, e.g. "Summary posted" or "Ignored action: closed".
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_url: Option<String>,
}

impl WebhookResponse {
    pub fn ignored(reason: impl ToString) -> Self {
        Self {
            message: reason.to_string(),
            comment_id: None,
            comment_url: None,
        }
    }
}
