//! Server Initialization
//!
//! Loads configuration, installs logging, builds the shared backend handle
//! and runs the HTTP surface. The backend is shut down once Rocket stops
//! (Ctrl+C or SIGTERM).

use crate::constants::{ROCKET_ADDRESS_KEY, ROCKET_PORT_KEY};
use crate::health::{HealthState, health_rocket};
use anyhow::{Context, anyhow};
use memo_infrastructure::cache::create_backend;
use memo_infrastructure::config::{AppConfig, ConfigLoader, ServerConfig};
use memo_infrastructure::health::{CacheHealth, check_cache_health};
use memo_infrastructure::logging::init_logging;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Run the HTTP surface until shutdown
pub async fn run_server(config_path: Option<&Path>) -> anyhow::Result<()> {
    let loader = config_loader(config_path);
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;
    loader.log_config_source();

    info!(
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.cache.effective_provider(),
        namespace = %config.cache.namespace,
        "Starting memocache server"
    );

    let backend = create_backend(&config.cache)?;
    let rocket = health_rocket(HealthState::new(Arc::clone(&backend)))
        .configure(rocket_figment(&config.server));

    let outcome = rocket.launch().await;
    backend.shutdown().await;

    if let Err(e) = outcome {
        error!(error = %e, "HTTP server failed");
        return Err(anyhow!("HTTP server failed: {e}"));
    }

    info!("memocache server stopped");
    Ok(())
}

/// Probe the configured backend once
///
/// Logging is not installed so stdout carries only the caller's output.
pub async fn ping_backend(config_path: Option<&Path>) -> anyhow::Result<CacheHealth> {
    let config = load_config(config_path)?;
    let backend = create_backend(&config.cache)?;

    let health = check_cache_health(&backend).await;
    backend.shutdown().await;

    Ok(health)
}

/// Load configuration from optional path
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    config_loader(config_path)
        .load()
        .context("Failed to load configuration")
}

fn config_loader(config_path: Option<&Path>) -> ConfigLoader {
    match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    }
}

fn rocket_figment(server: &ServerConfig) -> rocket::figment::Figment {
    rocket::Config::figment()
        .merge((ROCKET_ADDRESS_KEY, server.host.clone()))
        .merge((ROCKET_PORT_KEY, server.port))
}
