//! Request validation for inbound webhook deliveries.
//!
//! Order of checks:
//! 1. HMAC signature over the raw body (reject on failure, nothing else runs)
//! 2. `X-GitHub-Event` must be `pull_request`, otherwise the delivery is ignored
//! 3. JSON body is decoded and the action checked against the allow-list
//!
//! Ignored deliveries are a success for the caller.

pub mod event;
pub mod signature;

use thiserror::Error;
use tracing::{debug, warn};

pub use event::{PULL_REQUEST_EVENT, PullRequestPayload, WebhookEvent};
pub use signature::{compute_signature, format_signature_header, sign, verify_signature};

/// Header carrying the HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "x-hub-signature-256";
/// Header carrying the event name.
pub const HEADER_EVENT: &str = "x-github-event";
/// Header carrying GitHub's delivery id (logged only).
pub const HEADER_DELIVERY: &str = "x-github-delivery";

/// Shared-secret and filtering settings.
#[derive(Clone)]
pub struct WebhookConfig {
    pub secret: Vec<u8>,
    /// Pull request actions that trigger a summary.
    pub allowed_actions: Vec<String>,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"<redacted>")
            .field("allowed_actions", &self.allowed_actions)
            .finish()
    }
}

/// Errors raised while validating a delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header absent.
    #[error("missing signature header")]
    MissingSignature,

    /// Signature present but does not match the body.
    #[error("signature mismatch")]
    InvalidSignature,

    /// `pull_request` body could not be decoded.
    #[error("invalid pull_request payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    /// True for failures that mean the sender does not hold the secret.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature | WebhookError::InvalidSignature
        )
    }
}

/// Why a correctly signed delivery was not processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Event other than `pull_request` (or no event header at all).
    Event(String),
    /// `pull_request` with an action outside the allow-list.
    Action(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::Event(e) => write!(f, "Ignored event: {e}"),
            IgnoreReason::Action(a) => write!(f, "Ignored action: {a}"),
        }
    }
}

/// Outcome of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Accepted(WebhookEvent),
    Ignored(IgnoreReason),
}

/// Only verifies the signature; used by endpoints that are not GitHub events.
///
/// # Errors
/// [`WebhookError::MissingSignature`] / [`WebhookError::InvalidSignature`].
pub fn authenticate(
    cfg: &WebhookConfig,
    signature: Option<&str>,
    body: &[u8],
) -> Result<(), WebhookError> {
    let Some(signature) = signature else {
        warn!("webhook: signature header missing");
        return Err(WebhookError::MissingSignature);
    };
    if !verify_signature(body, signature, &cfg.secret) {
        warn!("webhook: signature verification failed");
        return Err(WebhookError::InvalidSignature);
    }
    Ok(())
}

/// Validates a raw delivery: signature first, then event type and action.
///
/// # Errors
/// Authentication failures, or an undecodable `pull_request` body.
pub fn validate_delivery(
    cfg: &WebhookConfig,
    signature: Option<&str>,
    event_type: Option<&str>,
    body: &[u8],
) -> Result<Delivery, WebhookError> {
    authenticate(cfg, signature, body)?;

    let event_type = event_type.unwrap_or_default();
    debug!(event_type, "webhook: signature ok");
    if event_type != PULL_REQUEST_EVENT {
        return Ok(Delivery::Ignored(IgnoreReason::Event(event_type.to_string())));
    }

    let payload: PullRequestPayload = serde_json::from_slice(body)?;
    debug!(action = %payload.action, "webhook: pull_request payload decoded");

    if !cfg.allowed_actions.iter().any(|a| *a == payload.action) {
        return Ok(Delivery::Ignored(IgnoreReason::Action(payload.action)));
    }

    Ok(Delivery::Accepted(WebhookEvent::from_payload(
        event_type, payload,
    )))
}
