//! # motionbridged — motion camera bridge daemon
//!
//! Composition root that wires all adapters together and runs the bridge.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and fail fast on invalid cameras
//! - Initialise logging
//! - Construct the HTTP fetcher, device gateway and dispatcher
//! - Open the MQTT session, handing it the dispatcher
//! - Block until SIGINT/SIGTERM, then disconnect cleanly and exit 0
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use motionbridge_adapter_http_reqwest::ReqwestFetcher;
use motionbridge_adapter_mqtt::{BusSession, SessionState};
use motionbridge_app::services::dispatcher::Dispatcher;
use motionbridge_app::services::gateway::DeviceGateway;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, config_path};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path(
        std::env::args().nth(1),
        std::env::var("MOTIONBRIDGE_CONFIG").ok(),
    );
    let config = Config::load(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Cameras
    let registry = Arc::new(config.registry()?);
    if registry.is_empty() {
        tracing::warn!("no cameras configured, only availability will be published");
    }
    for camera in registry.iter() {
        tracing::info!(
            camera = camera.name(),
            url = camera.base_url().unwrap_or("-"),
            pan_tilt = camera.has_pan_tilt(),
            "camera configured"
        );
    }

    // HTTP
    let fetcher = ReqwestFetcher::new(&config.http)?;
    let gateway = DeviceGateway::new(fetcher);

    // Bus
    let session = BusSession::connect(&config.mqtt, |publisher| {
        tracing::info!(
            subscribe = %config.mqtt.subscribe_topic,
            publish = %publisher.topic(),
            "bus topics"
        );
        Arc::new(Dispatcher::new(Arc::clone(&registry), gateway, publisher))
    })?;
    tokio::spawn(log_session_state(session.watch_state()));

    shutdown_signal().await?;
    tracing::info!("termination signal received");
    session.shutdown().await?;

    Ok(())
}

/// Report bus connectivity changes until the session ends.
async fn log_session_state(mut state: tokio::sync::watch::Receiver<SessionState>) {
    while state.changed().await.is_ok() {
        let current = *state.borrow_and_update();
        match current {
            SessionState::Connected => tracing::info!("bridge online"),
            SessionState::Disconnected => {
                tracing::warn!("bridge offline, commands are not received until reconnected");
            }
            SessionState::Connecting => tracing::debug!("reconnecting to MQTT broker"),
        }
    }
}

/// Resolve when the process receives SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
