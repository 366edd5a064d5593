use skyward_rewards_rust::config::ServerConfig;
use skyward_rewards_rust::error::StartupError;
use skyward_rewards_rust::router::create_app_router;
use skyward_rewards_rust::state::AppState;
use skyward_rewards_rust::widgets::WIDGET_SEEDS;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("skyward-rewards: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // Fails fast when any widget is missing its HTML
    let state = Arc::new(AppState::load(&config.assets_dir, WIDGET_SEEDS).await?);

    let app = create_app_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Server running on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
