//! Error taxonomy shared by the forwarder and the HTTP boundary.
//!
//! # Design Decisions
//! - Every failure a caller can observe maps to exactly one `ErrorKind`
//! - Each kind has a fixed HTTP status; upstream statuses are never errors
//! - Errors carry the human-readable detail that ends up in the envelope

use axum::http::StatusCode;
use thiserror::Error;

/// Classification of a failed gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller omitted a required input.
    MissingParameter,
    /// Routing key is not configured.
    UnknownTarget,
    /// Network, DNS or timeout failure reaching the origin.
    UpstreamUnreachable,
    /// Anything else that went wrong while forwarding.
    InternalError,
}

impl ErrorKind {
    /// HTTP status the boundary responds with for this kind.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::MissingParameter => StatusCode::BAD_REQUEST,
            ErrorKind::UnknownTarget => StatusCode::NOT_FOUND,
            ErrorKind::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingParameter => "missing_parameter",
            ErrorKind::UnknownTarget => "unknown_target",
            ErrorKind::UpstreamUnreachable => "upstream_unreachable",
            ErrorKind::InternalError => "internal_error",
        }
    }
}

/// Errors produced while resolving or forwarding a request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required query parameter(s) absent or empty.
    #[error("{0}")]
    MissingParameter(String),

    /// Routing key not present in the target registry.
    #[error("Invalid Configuration ID: '{0}'.")]
    UnknownTarget(String),

    /// No response was received from the origin.
    #[error("Connection failed")]
    UpstreamUnreachable { details: String },

    /// Unexpected failure outside the HTTP client.
    #[error("Server error")]
    Internal { details: String },
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::MissingParameter(_) => ErrorKind::MissingParameter,
            GatewayError::UnknownTarget(_) => ErrorKind::UnknownTarget,
            GatewayError::UpstreamUnreachable { .. } => ErrorKind::UpstreamUnreachable,
            GatewayError::Internal { .. } => ErrorKind::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Underlying failure text, present only for forwarding failures.
    pub fn details(&self) -> Option<&str> {
        match self {
            GatewayError::UpstreamUnreachable { details } | GatewayError::Internal { details } => {
                Some(details)
            }
            _ => None,
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
