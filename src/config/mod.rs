//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!
//! environment
//!     → loader.rs (Credentials::from_env, names taken from [credentials])
//!
//! GatewayConfig + Credentials
//!     → TargetRegistry + Forwarder, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets are read from the environment, never from the file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, Credentials};
pub use schema::{
    CorsConfig, CredentialConfig, GatewayConfig, HeaderConfig, ListenerConfig,
    ObservabilityConfig, TargetConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::ValidationError;
