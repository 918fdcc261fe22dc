use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lottovision_api::{
    config::Config,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    // Initialize application state
    let state = AppState::from_config(config)?;

    // Create the router with all routes
    let app = create_router(Arc::new(state));

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
