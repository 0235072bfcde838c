//! HTTP entry point of the feedback token exchange.

use std::sync::Arc;

use anyhow::Context;
use feedback_core::{config::FeedbackConfig, FeedbackCore};
use tokio::net::TcpListener;
use tracing::info;

mod logging;
mod router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    let config = FeedbackConfig::from_env().context("Invalid configuration")?;
    let core = FeedbackCore::new(&config)
        .await
        .context("Could not initialize feedback core")?;

    let app = router::router(Arc::new(core));

    let listener = TcpListener::bind(&config.http.bind_address)
        .await
        .with_context(|| format!("Could not bind {}", config.http.bind_address))?;
    info!("Listening on {}", config.http.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
