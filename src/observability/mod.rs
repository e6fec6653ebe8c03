//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and forwarder produce:
//!     → logging.rs (structured log events, request ID attached)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
