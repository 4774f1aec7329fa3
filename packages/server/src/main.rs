use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use evaluator::Evaluator;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = server::database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    let evaluator =
        Evaluator::from_config(&config.evaluator).context("Failed to build evaluator")?;
    info!(
        repository_reader = %config.evaluator.repository_reader_url,
        video_parser = %config.evaluator.video_parser_url,
        model = %config.evaluator.model.name,
        "Evaluator configured"
    );
    if config.evaluator.model.api_key.is_empty() {
        tracing::warn!("No model API key configured; evaluations will end in SYSTEM_ERROR");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        evaluator: Arc::new(evaluator),
    };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
