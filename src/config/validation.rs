//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every target has an absolute http(s) URL and a referrer that is a
//!   legal header value
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check extra header names and values are legal HTTP
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("timeouts.upstream_secs must be greater than zero")]
    ZeroTimeout,

    #[error("target key must not be empty")]
    EmptyTargetKey,

    #[error("target '{key}': invalid url '{url}'")]
    TargetUrl { key: String, url: String },

    #[error("target '{0}': referrer must not be empty")]
    EmptyReferrer(String),

    #[error("target '{0}': referrer is not a valid header value")]
    InvalidReferrer(String),

    #[error("invalid header '{0}'")]
    Header(String),
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for (key, target) in &config.targets {
        if key.trim().is_empty() {
            errors.push(ValidationError::EmptyTargetKey);
        }
        if !is_absolute_http_url(&target.url) {
            errors.push(ValidationError::TargetUrl {
                key: key.clone(),
                url: target.url.clone(),
            });
        }
        if target.referrer.trim().is_empty() {
            errors.push(ValidationError::EmptyReferrer(key.clone()));
        } else if HeaderValue::from_str(&target.referrer).is_err() {
            errors.push(ValidationError::InvalidReferrer(key.clone()));
        }
    }

    for (name, value) in &config.headers.extra {
        if HeaderName::from_bytes(name.as_bytes()).is_err()
            || HeaderValue::from_str(value).is_err()
        {
            errors.push(ValidationError::Header(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_absolute_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
