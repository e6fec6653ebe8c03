//! Response envelopes.
//!
//! # Responsibilities
//! - Shape forwarding outcomes into the JSON envelope callers rely on
//! - Pick the response status (upstream status, or the error kind's status)
//! - Render boundary errors (missing parameter, unknown key)
//!
//! # Design Decisions
//! - Upstream statuses are propagated verbatim, never reinterpreted
//! - Statuses that forbid a body (1xx, 204, 205, 304) are answered with 200 so
//!   the envelope reaches the caller; `status_code` keeps the real value
//! - `content_encoding` is always present on success, `null` when not sent
//! - An upstream status this side cannot represent becomes 502

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::GatewayError;
use crate::forwarder::{ForwardResult, UpstreamResponse};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Upstream(UpstreamResponse),
    Failed {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

/// Envelope returned by both forwarding endpoints.
#[derive(Debug, Serialize)]
pub struct ForwardEnvelope {
    #[serde(flatten)]
    outcome: Outcome,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_mode: Option<bool>,

    pub target_url_used: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_used: Option<String>,

    #[serde(skip)]
    status: StatusCode,
}

impl ForwardEnvelope {
    fn from_result(result: ForwardResult, target_url_used: String) -> Self {
        let (outcome, status) = match result {
            ForwardResult::Upstream(response) => {
                let status = envelope_status(response.status_code);
                (Outcome::Upstream(response), status)
            }
            ForwardResult::Failed(err) => {
                let status = err.status_code();
                let outcome = Outcome::Failed {
                    error: err.to_string(),
                    details: err.details().map(str::to_string),
                };
                (outcome, status)
            }
        };

        Self {
            outcome,
            config_id: None,
            test_mode: None,
            target_url_used,
            referrer_used: None,
            status,
        }
    }

    /// Envelope for a forward addressed by routing key.
    pub fn by_key(config_id: &str, target_url_used: String, result: ForwardResult) -> Self {
        Self {
            config_id: Some(config_id.to_string()),
            ..Self::from_result(result, target_url_used)
        }
    }

    /// Envelope for a forward addressed by explicit URL and referrer.
    pub fn by_target(target_url_used: String, referrer_used: &str, result: ForwardResult) -> Self {
        Self {
            test_mode: Some(true),
            referrer_used: Some(referrer_used.to_string()),
            ..Self::from_result(result, target_url_used)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

fn envelope_status(upstream: u16) -> StatusCode {
    match StatusCode::from_u16(upstream) {
        Ok(status) if bodiless(status) => StatusCode::OK,
        Ok(status) => status,
        Err(_) => StatusCode::BAD_GATEWAY,
    }
}

fn bodiless(status: StatusCode) -> bool {
    status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::RESET_CONTENT
        || status == StatusCode::NOT_MODIFIED
}

impl IntoResponse for ForwardEnvelope {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details().map(str::to_string),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// One entry of the discovery listing.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub description: String,
    pub example_url: String,
}

/// Body of the discovery endpoint.
#[derive(Debug, Serialize)]
pub struct TargetListing {
    pub message: &'static str,
    pub available_endpoints: BTreeMap<String, EndpointInfo>,
}
