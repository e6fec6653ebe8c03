//! Forwarding gateway
//!
//! Accepts GET requests naming a configured routing key (`/api?get=<key>`) or an
//! explicit target (`/test?url=…&referrer=…`), attaches a fixed browser
//! fingerprint and credentials, performs one upstream GET and relays the result
//! as a JSON envelope.
//!
//! ```text
//!   client ──▶ axum router ──▶ handlers ──▶ Forwarder ──▶ origin
//!                 │                             │
//!                 │   TargetRegistry (static)   │  base headers (static)
//!   client ◀── JSON envelope ◀──────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forward_gateway::config::{load_config, GatewayConfig};
use forward_gateway::lifecycle::{bootstrap, signals, Shutdown};
use forward_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Configuration-driven HTTP forwarding gateway", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overriding the config file.
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on all interfaces (ignored when --bind is given).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    } else if let Some(port) = args.port {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    logging::init_logging(&config.observability);
    tracing::info!("forward-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        targets = config.targets.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = bootstrap(config)?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
