//! Shared LLM service: env-driven model config, unified errors and a thin
//! client for OpenAI-compatible chat-completion providers.
//!
//! Construct [`ChatCompletionService`] once at startup, wrap it in `Arc`
//! (or clone it; the inner HTTP client is reference-counted) and pass it to
//! dependents.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
pub use services::chat_completion_service::ChatCompletionService;
