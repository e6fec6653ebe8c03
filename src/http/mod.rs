//! HTTP boundary subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, CORS, tracing)
//!     → request.rs (request ID, query split into addressing keys and extras)
//!     → handlers.rs (list / forward by key / forward by target)
//!     → forwarder (single upstream GET)
//!     → response.rs (envelope, status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, QueryParams, X_REQUEST_ID};
pub use response::ForwardEnvelope;
pub use server::{AppState, GatewayServer};
