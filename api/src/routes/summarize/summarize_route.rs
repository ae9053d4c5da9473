use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::HeaderMap};
use pr_summarizer::{parse_pr_url, webhook::HEADER_SIGNATURE, webhook::authenticate};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::{
        summarize::{summarize_request::SummarizeRequest, summarize_response::SummarizeResponse},
        webhook::webhook_route::header_str,
    },
};

/// Manual summary of a PR given by URL, in chunked mode.
#[instrument(name = "summarize_route", skip(state, headers, body))]
pub async fn summarize_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<ApiResponse<SummarizeResponse>> {
    authenticate(&state.webhook, header_str(&headers, HEADER_SIGNATURE), &body)?;

    let req: SummarizeRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let pr = parse_pr_url(&req.pr_url)?;

    info!(%pr, post_comment = req.post_comment, "manual summary requested");
    let out = state.summarizer.summarize_pr(&pr, req.post_comment).await?;

    Ok(ApiResponse::success(out.into()))
}
