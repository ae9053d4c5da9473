use std::net::SocketAddr;

use pr_summarizer::{
    Summarizer, SummarizerConfig, WebhookConfig, errors::ConfigError as SummarizerConfigError,
};
use thiserror::Error;

use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:5000";

/// Startup configuration errors owned by the API layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API_ADDRESS `{value}`: {reason}")]
    InvalidAddress { value: String, reason: String },

    #[error(transparent)]
    Summarizer(#[from] SummarizerConfigError),
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub address: SocketAddr,
}

/// Full process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub summarizer: SummarizerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Reads `API_ADDRESS` plus everything the summarizer needs.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("API_ADDRESS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
        let address = raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidAddress {
            value: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api: ApiConfig { address },
            summarizer: SummarizerConfig::from_lookup(lookup)?,
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pre-built GitHub + LLM clients.
    pub summarizer: Summarizer,
    /// Secret and action allow-list for inbound deliveries.
    pub webhook: WebhookConfig,
}

impl AppState {
    /// Builds clients from the loaded configuration.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let summarizer = Summarizer::new(&config.summarizer).map_err(AppError::Startup)?;
        Ok(Self {
            summarizer,
            webhook: config.summarizer.webhook.clone(),
        })
    }
}
