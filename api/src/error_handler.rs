use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pr_summarizer::{WebhookError, errors::Error as PipelineError};
use thiserror::Error;
use tracing::{error, warn};

use crate::core::{app_state::ConfigError, http::response_envelope::ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build clients: {0}")]
    Startup(#[source] PipelineError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    /// Signature or payload problems on an inbound delivery.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// A pipeline stage failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Webhook(e) if e.is_authentication() => StatusCode::FORBIDDEN,
            AppError::Webhook(_) => StatusCode::BAD_REQUEST,

            AppError::Pipeline(e) => match e {
                PipelineError::Fetch(_) | PipelineError::Summarize(_) | PipelineError::Post(_) => {
                    StatusCode::BAD_GATEWAY
                }
                PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
                PipelineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },

            // 5xx, startup-only
            AppError::Config(_)
            | AppError::Startup(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Startup(_) => "STARTUP_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound => "NOT_FOUND",
            AppError::Webhook(WebhookError::MissingSignature) => "MISSING_SIGNATURE",
            AppError::Webhook(WebhookError::InvalidSignature) => "INVALID_SIGNATURE",
            AppError::Webhook(WebhookError::InvalidPayload(_)) => "INVALID_PAYLOAD",
            AppError::Pipeline(e) => match e {
                PipelineError::Fetch(_) => "FETCH_FAILED",
                PipelineError::Summarize(_) => "SUMMARIZE_FAILED",
                PipelineError::Post(_) => "POST_FAILED",
                PipelineError::Validation(_) => "VALIDATION_ERROR",
                PipelineError::Config(_) => "CONFIG_ERROR",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        if status.is_server_error() {
            error!(%status, code, error = %self, "request failed");
        } else {
            warn!(%status, code, error = %self, "request rejected");
        }
        ApiResponse::<()>::error(code, self.to_string(), Vec::new()).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
