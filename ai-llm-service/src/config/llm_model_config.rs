use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which backend to use (Fireworks, OpenAI).
/// - `model`: The model identifier (e.g. `"accounts/fireworks/models/llama-v3p1-8b-instruct"`).
/// - `endpoint`: Base URL; `/v1/chat/completions` is appended.
/// - `api_key`: API key sent as a bearer token.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`, `top_p`, `top_k`: sampling controls.
/// - `presence_penalty`, `frequency_penalty`: repetition controls.
/// - `timeout_secs`: request timeout in seconds (defaults to 60).
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Fireworks,
///     model: "accounts/fireworks/models/llama-v3p1-8b-instruct".to_string(),
///     endpoint: "https://api.fireworks.ai/inference".to_string(),
///     api_key: Some("fw-...".to_string()),
///     max_tokens: Some(1024),
///     temperature: Some(0.6),
///     top_p: Some(1.0),
///     top_k: Some(40),
///     presence_penalty: Some(0.0),
///     frequency_penalty: Some(0.0),
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.timeout_secs, Some(60));
/// ```
#[derive(Clone)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub presence_penalty: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub timeout_secs: Option<u64>,
}

// `api_key` is redacted.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .field("presence_penalty", &self.presence_penalty)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
