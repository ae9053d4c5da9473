mod telemetry;

use anyhow::Context;
use api::core::app_state::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv().ok();

    telemetry::init().context("failed to install tracing subscriber")?;
    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(
        address = %config.api.address,
        model = %config.summarizer.llm.model,
        actions = ?config.summarizer.webhook.allowed_actions,
        "configuration loaded"
    );

    api::start(config).await?;

    Ok(())
}
