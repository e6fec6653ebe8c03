//! Configuration-driven HTTP forwarding gateway library.

pub mod config;
pub mod error;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use error::{ErrorKind, GatewayError};
pub use forwarder::{ForwardResult, Forwarder, TargetRegistry};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
