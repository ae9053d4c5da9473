//! HTTP surface of the PR summary bot.
//!
//! | Method | Path         | Purpose                                   |
//! |--------|--------------|-------------------------------------------|
//! | POST   | `/webhook`   | GitHub `pull_request` deliveries          |
//! | POST   | `/summarize` | manual, signed summary of a PR by URL     |
//! | GET    | `/health`    | liveness                                  |

pub mod core;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    core::app_state::{AppConfig, AppState},
    error_handler::AppError,
    routes::{
        health_route::health_route, summarize::summarize_route::summarize_route,
        webhook::webhook_route::webhook_route,
    },
};

/// Builds the router over already-constructed state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_route))
        .route("/summarize", post(summarize_route))
        .route("/health", get(health_route))
        .fallback(not_found)
        .with_state(state)
}

/// Builds clients, binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start(config: AppConfig) -> Result<(), AppError> {
    let state = Arc::new(AppState::new(&config)?);
    let app = build_router(state);

    let listener = TcpListener::bind(config.api.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.api.address, "api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler, keep serving.
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
