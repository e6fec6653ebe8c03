//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve credentials from the environment
//! - Build the target registry and the forwarder in dependency order
//! - Hand the finished server to the caller, ready to bind
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use crate::config::{ConfigError, Credentials, GatewayConfig};
use crate::forwarder::{Forwarder, TargetRegistry};
use crate::http::GatewayServer;

/// Build a server from validated config, reading credentials from the environment.
pub fn bootstrap(config: GatewayConfig) -> Result<GatewayServer, ConfigError> {
    let credentials = Credentials::from_env(&config.credentials);
    bootstrap_with(config, &credentials)
}

/// Build a server from validated config and explicit credentials.
pub fn bootstrap_with(
    config: GatewayConfig,
    credentials: &Credentials,
) -> Result<GatewayServer, ConfigError> {
    let forwarder = Forwarder::from_config(&config, credentials)?;
    let registry = TargetRegistry::from_config(config.targets.clone());

    tracing::info!(targets = registry.len(), "Target registry loaded");
    if registry.is_empty() {
        tracing::warn!("No targets configured; only direct-target forwarding is available");
    }

    Ok(GatewayServer::new(&config, registry, forwarder))
}
