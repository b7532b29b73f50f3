use anyhow::Context;

use feedback_domain::FeedbackService;
use feedback_infra::{build_feedback_repository, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feedback_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let repo = build_feedback_repository(&config.storage)
        .await
        .context("failed to initialize feedback storage")?;

    let app = feedback_api::app::build_app(FeedbackService::new(repo));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
