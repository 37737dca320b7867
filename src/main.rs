use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warp::Filter;

use mindtrack_coach::config::Config;
use mindtrack_coach::handlers::AppState;
use mindtrack_coach::llm::GeminiClient;
use mindtrack_coach::routes::configure_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let provider = GeminiClient::new(config.gemini())?;
    info!(
        model = %provider.model(),
        timeout_secs = config.provider_timeout_secs,
        token_interval_ms = config.token_interval_ms,
        "Provider configured"
    );

    let state = AppState::new(Arc::new(provider), config.token_interval());
    let routes = configure_routes(state).with(warp::trace::request());

    let addr = config.bind_addr();
    info!("Starting server on http://{}", addr);
    warp::serve(routes).run(addr).await;

    Ok(())
}
