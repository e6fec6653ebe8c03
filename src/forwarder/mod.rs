//! Forwarding core.
//!
//! # Data Flow
//! ```text
//! routing key ──→ target.rs (TargetRegistry::resolve_target)
//!                     │
//! explicit url ───────┤
//!                     ▼
//!              url.rs (build_url with path suffix)
//!                     ▼
//!              headers.rs (base headers + Referer)
//!                     ▼
//!              client.rs (single GET, timeout)
//!                     ▼
//!              decode.rs (gzip / deflate per Content-Encoding)
//!                     ▼
//!              result.rs (JSON or text → ForwardResult)
//! ```
//!
//! # Design Decisions
//! - Registry and base headers are immutable after startup; no locking
//! - Forwarder never panics or propagates; it always returns a ForwardResult
//! - Which inbound query keys are reserved is the boundary's concern, not ours

pub mod client;
pub mod decode;
pub mod headers;
pub mod result;
pub mod target;
pub mod url;

pub use client::{ExtraParams, ForwardRequest, Forwarder};
pub use headers::build_base_headers;
pub use result::{ForwardResult, ResponseData, UpstreamResponse};
pub use target::{TargetRegistry, TargetSpec};
pub use url::build_url;
