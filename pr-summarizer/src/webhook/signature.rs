//! HMAC-SHA256 webhook signatures (`X-Hub-Signature-256: sha256=<hex>`).
//!
//! Verification runs over the raw request body before anything is parsed.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

/// Decodes a `sha256=<hex>` header value into raw bytes.
///
/// Returns `None` for a missing prefix or invalid hex. Never panics.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.trim().strip_prefix(PREFIX)?;
    hex::decode(hex_sig).ok()
}

/// Computes HMAC-SHA256 of `payload` keyed by `secret`.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats raw signature bytes as a header value (`sha256=<hex>`).
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("{PREFIX}{}", hex::encode(signature))
}

/// Convenience for callers that sign outgoing test or manual requests.
pub fn sign(payload: &[u8], secret: &[u8]) -> String {
    format_signature_header(&compute_signature(payload, secret))
}

/// Verifies `signature_header` against `payload` and `secret`.
///
/// The comparison is constant-time (`Mac::verify_slice`). Malformed headers
/// and signatures of the wrong length return `false`.
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let Some(expected) = parse_signature_header(signature_header) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}
