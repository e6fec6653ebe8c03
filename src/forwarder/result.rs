//! Forwarding outcomes.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorKind, GatewayError};

/// Upstream body, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

impl ResponseData {
    /// Parse `body` as JSON, keeping the raw text when it is not.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ResponseData::Json(value),
            Err(_) => ResponseData::Text(body),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ResponseData::Json(_))
    }
}

/// A response received from the origin, whatever its status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamResponse {
    pub status_code: u16,
    pub content_encoding: Option<String>,
    pub data: ResponseData,
}

/// Outcome of a single forward.
#[derive(Debug)]
pub enum ForwardResult {
    Upstream(UpstreamResponse),
    Failed(GatewayError),
}

impl ForwardResult {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ForwardResult::Upstream(r) => Some(r.status_code),
            ForwardResult::Failed(_) => None,
        }
    }

    pub fn content_encoding(&self) -> Option<&str> {
        match self {
            ForwardResult::Upstream(r) => r.content_encoding.as_deref(),
            ForwardResult::Failed(_) => None,
        }
    }

    pub fn data(&self) -> Option<&ResponseData> {
        match self {
            ForwardResult::Upstream(r) => Some(&r.data),
            ForwardResult::Failed(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ForwardResult::Upstream(_) => None,
            ForwardResult::Failed(e) => Some(e.kind()),
        }
    }
}

impl From<GatewayError> for ForwardResult {
    fn from(err: GatewayError) -> Self {
        ForwardResult::Failed(err)
    }
}
