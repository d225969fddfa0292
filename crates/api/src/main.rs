//! Slotbook - appointment scheduling server
//!
//! Main entry point for the HTTP application.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use slotbook_domain::Config;
use slotbook_infra::config as config_loader;
use slotbook_lib::context::AppContext;
use slotbook_lib::routes::create_router;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "slotbook=debug,slotbook_lib=debug,slotbook_core=debug,slotbook_infra=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match config_loader::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "no configuration found, using defaults");
            Config::default()
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let context = Arc::new(AppContext::new_with_config(config).await?);
    let app = create_router(context);

    info!("slotbook listening on {}", addr);

    let listener =
        tokio::net::TcpListener::bind(addr).await.context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Failed to serve application")?;

    Ok(())
}
