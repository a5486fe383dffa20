mod app;
mod config;
mod routes;
mod services;
mod types;
mod utils;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("Starting app...");

    let config = AppConfig::load()?;
    if config.places.api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY is not set; searches will fail until it is configured");
    }

    let app = app::gen_app(config.places, config.backend);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, env = ?config.env, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
