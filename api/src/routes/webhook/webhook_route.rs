use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use pr_summarizer::{
    Delivery, validate_delivery,
    webhook::{HEADER_DELIVERY, HEADER_EVENT, HEADER_SIGNATURE},
};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::webhook::webhook_response::WebhookResponse,
};

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}

/// GitHub webhook receiver.
///
/// The raw body is taken as bytes so the signature is checked over exactly
/// what GitHub signed. Ignored events and actions answer 200 with no outbound
/// calls; accepted ones run fetch → summarize → post before responding.
#[instrument(
    name = "webhook_route",
    skip(state, headers, body),
    fields(
        event = header_str(&headers, HEADER_EVENT).unwrap_or_default(),
        delivery = header_str(&headers, HEADER_DELIVERY).unwrap_or_default(),
    )
)]
pub async fn webhook_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<ApiResponse<WebhookResponse>> {
    let delivery = validate_delivery(
        &state.webhook,
        header_str(&headers, HEADER_SIGNATURE),
        header_str(&headers, HEADER_EVENT),
        &body,
    )?;

    let event = match delivery {
        Delivery::Ignored(reason) => {
            info!(%reason, "webhook ignored");
            return Ok(ApiResponse::success(WebhookResponse::ignored(reason)));
        }
        Delivery::Accepted(event) => event,
    };

    info!(
        repo = %event.repository,
        number = event.number,
        action = %event.action,
        "webhook accepted, running summary"
    );
    let posted = state.summarizer.run_webhook(&event).await?;

    Ok(ApiResponse::success(WebhookResponse {
        message: "Summary posted".to_string(),
        comment_id: Some(posted.id),
        comment_url: posted.html_url,
    }))
}
