//! Main entry point for the Image Generation Gateway

use imagegen_gateway::{
    admin::SettingsStore, api, backend::registry::ProviderRegistry, config::ServiceConfig,
    gateway::Dispatcher, AppState,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServiceConfig::load()?;

    // Initialize logging, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting Image Generation Gateway");

    config.validate()?;
    info!(
        "Loaded configuration: server={}:{}",
        config.server.host, config.server.port
    );

    if config.auth.token().is_none() {
        warn!("No admin token configured; admin settings endpoints are open to all callers");
    }

    // Register provider clients from configuration
    let providers = Arc::new(ProviderRegistry::from_config(&config.providers)?);
    if providers.is_empty() {
        warn!("No provider endpoints configured; generation requests will fail");
    } else {
        info!(count = providers.len(), "Provider clients ready");
    }

    let app_state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(SettingsStore::new()),
        Arc::new(Dispatcher::new(providers)),
    ));

    // Build the router
    let app = api::routes::create_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
