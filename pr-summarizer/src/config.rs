//! Startup configuration for the summarizer pipeline.
//!
//! Loaded once and passed down explicitly; nothing else reads the environment.
//!
//! # Environment variables
//!
//! - `GITHUB_TOKEN`              = access token (mandatory)
//! - `GITHUB_WEBHOOK_SECRET`     = shared webhook secret (mandatory)
//! - `GITHUB_API_BASE`           = REST base (default `https://api.github.com`)
//! - `PR_SUMMARY_ACTIONS`        = comma list (default `opened,synchronize,reopened`)
//! - `PR_SUMMARY_MAX_DIFF_CHARS` = single-prompt diff budget (default 100000)
//! - `PR_SUMMARY_CHUNK_CHARS`    = chunk size for manual summaries (default 50000)
//! - `PR_SUMMARY_COMMENT_TITLE`  = comment heading (default `PR Summary by Dobby-70`)
//!
//! LLM variables are read by `ai_llm_service::config::default_config`.

use ai_llm_service::LlmModelConfig;
use ai_llm_service::config::default_config::config_fireworks_summary_from;

use crate::errors::ConfigError;
use crate::git_providers::ProviderConfig;
use crate::webhook::WebhookConfig;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_ACTIONS: &[&str] = &["opened", "synchronize", "reopened"];
pub const DEFAULT_MAX_DIFF_CHARS: usize = 100_000;
pub const DEFAULT_CHUNK_CHARS: usize = 50_000;
pub const DEFAULT_COMMENT_TITLE: &str = "PR Summary by Dobby-70";

/// Prompt and comment shaping.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub max_diff_chars: usize,
    pub chunk_chars: usize,
    pub comment_title: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            chunk_chars: DEFAULT_CHUNK_CHARS,
            comment_title: DEFAULT_COMMENT_TITLE.to_string(),
        }
    }
}

/// Everything the pipeline needs.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub github: ProviderConfig,
    pub webhook: WebhookConfig,
    pub summary: SummaryOptions,
    pub llm: LlmModelConfig,
}

impl SummarizerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Reads from an arbitrary lookup (tests pass a map).
    ///
    /// # Errors
    /// Missing mandatory variables, unparsable numbers, an empty action list
    /// or invalid LLM settings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = must(&lookup, "GITHUB_TOKEN")?;
        let secret = must(&lookup, "GITHUB_WEBHOOK_SECRET")?;
        let base_api = opt(&lookup, "GITHUB_API_BASE").unwrap_or_else(|| DEFAULT_GITHUB_API.into());

        let allowed_actions = match opt(&lookup, "PR_SUMMARY_ACTIONS") {
            Some(raw) => {
                let list: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if list.is_empty() {
                    return Err(ConfigError::EmptyActions("PR_SUMMARY_ACTIONS"));
                }
                list
            }
            None => DEFAULT_ACTIONS.iter().map(|s| s.to_string()).collect(),
        };

        let summary = SummaryOptions {
            max_diff_chars: positive(&lookup, "PR_SUMMARY_MAX_DIFF_CHARS")?
                .unwrap_or(DEFAULT_MAX_DIFF_CHARS),
            chunk_chars: positive(&lookup, "PR_SUMMARY_CHUNK_CHARS")?
                .unwrap_or(DEFAULT_CHUNK_CHARS),
            comment_title: opt(&lookup, "PR_SUMMARY_COMMENT_TITLE")
                .unwrap_or_else(|| DEFAULT_COMMENT_TITLE.into()),
        };

        let llm = config_fireworks_summary_from(&lookup)?;

        Ok(Self {
            github: ProviderConfig { base_api, token },
            webhook: WebhookConfig {
                secret: secret.into_bytes(),
                allowed_actions,
            },
            summary,
            llm,
        })
    }
}

fn opt<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn must<F: Fn(&str) -> Option<String>>(lookup: &F, name: &'static str) -> Result<String, ConfigError> {
    opt(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn positive<F: Fn(&str) -> Option<String>>(
    lookup: &F,
    name: &'static str,
) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = opt(lookup, name) else {
        return Ok(None);
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidNumber {
            var: name,
            reason: "must be greater than zero",
        }),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(ConfigError::InvalidNumber {
            var: name,
            reason: "not an unsigned integer",
        }),
    }
}
