//! Default LLM configs loaded from environment variables.
//!
//! Currently one role is needed: the **summary** model, served by Fireworks
//! (OpenAI-compatible chat completions).
//!
//! # Environment variables
//!
//! - `FIREWORKS_API_KEY` = API key (mandatory)
//! - `FIREWORKS_URL`     = base endpoint (default `https://api.fireworks.ai/inference`)
//! - `FIREWORKS_MODEL`   = model id (default: the Dobby 70B model)
//! - `LLM_MAX_TOKENS`    = max tokens to generate (default 1024)
//! - `LLM_TIMEOUT_SECS`  = request timeout in seconds, at least 1 (default 60)
//!
//! Callers pass their own lookup (`|k| std::env::var(k).ok()` in production).

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        ConfigError, Result, must_var, opt_u32, opt_u64, opt_var, validate_http_endpoint,
    },
};

/// Model used when `FIREWORKS_MODEL` is not set.
pub const DEFAULT_FIREWORKS_MODEL: &str =
    "accounts/sentientfoundation/models/dobby-unhinged-llama-3-3-70b-new";

const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constructs the summary-model config from an arbitrary variable lookup.
///
/// # Defaults
/// - `temperature = Some(0.6)`, `top_p = Some(1.0)`, `top_k = Some(40)`
/// - `presence_penalty = Some(0.0)`, `frequency_penalty = Some(0.0)`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if `FIREWORKS_API_KEY` is missing
/// - [`ConfigError::InvalidFormat`] if `FIREWORKS_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] if a numeric variable does not parse, or
///   `LLM_TIMEOUT_SECS` is zero
pub fn config_fireworks_summary_from<F>(lookup: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_var(&lookup, "FIREWORKS_API_KEY")?;

    let endpoint = opt_var(&lookup, "FIREWORKS_URL")
        .unwrap_or_else(|| LlmProvider::Fireworks.default_endpoint().to_string());
    validate_http_endpoint("FIREWORKS_URL", &endpoint)?;

    let model =
        opt_var(&lookup, "FIREWORKS_MODEL").unwrap_or_else(|| DEFAULT_FIREWORKS_MODEL.to_string());

    let max_tokens = opt_u32(&lookup, "LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    let timeout_secs = opt_u64(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidNumber {
            var: "LLM_TIMEOUT_SECS",
            reason: "must be greater than zero",
        }
        .into());
    }

    Ok(LlmModelConfig {
        provider: LlmProvider::Fireworks,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(max_tokens),
        temperature: Some(0.6),
        top_p: Some(1.0),
        top_k: Some(40),
        presence_penalty: Some(0.0),
        frequency_penalty: Some(0.0),
        timeout_secs: Some(timeout_secs),
    })
}
