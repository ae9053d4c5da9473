use serde::Serialize;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness probe.
pub async fn health_route() -> ApiResponse<Health> {
    ApiResponse::success(Health { status: "ok" })
}
