/// Represents the hosted backend used for chat-completion inference.
///
/// Both providers speak the OpenAI-compatible `/v1/chat/completions` protocol;
/// the variant only decides the default endpoint and error attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Fireworks AI inference API.
    Fireworks,
    /// OpenAI's API.
    OpenAI,
}

impl LlmProvider {
    /// Base URL the `/v1/chat/completions` path is appended to.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::Fireworks => "https://api.fireworks.ai/inference",
            LlmProvider::OpenAI => "https://api.openai.com",
        }
    }
}
