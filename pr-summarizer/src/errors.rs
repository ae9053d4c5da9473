//! Crate-wide error hierarchy for pr-summarizer.
//!
//! - Single root `Error` for all pipeline functions; the variant names the stage
//!   that failed (fetch / summarize / post), which is what callers map to
//!   HTTP statuses and log lines.
//! - Provider-aware mapping (401→Unauthorized, 404→NotFound, 5xx→Server, etc.).
//! - Ergonomic `?` via `From` impls where the stage is unambiguous.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type MrResult<T> = Result<T, Error>;

/// Root error type for the pr-summarizer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Diff retrieval from the source-control API failed.
    #[error("diff fetch failed: {0}")]
    Fetch(#[source] ProviderError),

    /// Language-model call failed or returned unusable content.
    #[error("summarization failed: {0}")]
    Summarize(#[source] AiLlmError),

    /// Comment creation on the source-control API failed.
    #[error("comment posting failed: {0}")]
    Post(#[source] ProviderError),

    /// Configuration problems (bad/missing tokens, base URL, etc.).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input validation errors (bad repository names, PR URLs, etc.).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Detailed provider-specific error used inside the GitHub client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited,

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Maps a non-success HTTP status code.
    pub fn from_status(code: u16) -> Self {
        match code {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited,
            500..=599 => ProviderError::Server(code),
            _ => ProviderError::HttpStatus(code),
        }
    }
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error("{0} must contain at least one action")]
    EmptyActions(&'static str),

    /// LLM settings could not be loaded.
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    /// HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16());
        }
        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }
        ProviderError::Network(e.to_string())
    }
}
