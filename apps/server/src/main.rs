use failscope_api::axum;
use failscope_api::{construct_router, state::State};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Failscope API Service");

    let config = config::Config::from_env()?;
    tracing::info!("Loading artifacts from {}", config.data_dir.display());

    // Missing or partial artifacts are a boot failure; the dashboard must
    // never come up over fabricated empty data.
    let state = Arc::new(State::load(&config.data_dir)?);

    let app = construct_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
