use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use cropcast_core::ModelWrapper;
use cropcast_server::{app, cors_layer, ServerState, ENCODER_PATH, MODEL_PATH};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let cors_url = env::var("CORS_URL").context("CORS_URL must be set")?;
    let cors = cors_layer(&cors_url)
        .with_context(|| format!("CORS_URL is not a valid origin: {}", cors_url))?;

    // Artifact loading runs exactly once, before the listener binds; a
    // failure here must keep the service from serving at all.
    let wrapper = ModelWrapper::from_paths(MODEL_PATH, ENCODER_PATH).map_err(|e| {
        error!("Cannot start without model artifacts: {}", e);
        e
    })?;
    info!("Model loaded, classes: {:?}", wrapper.classes());

    let state = Arc::new(ServerState::new(wrapper));
    let app = app(state).layer(cors);

    let addr = "0.0.0.0:8000";
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
