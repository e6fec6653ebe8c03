//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Issue exactly one GET per forward, under a fixed timeout
//! - Attach the base headers plus the per-call `Referer`
//! - Adapt the upstream response into a `ForwardResult`
//!
//! # Design Decisions
//! - No retries: one failed attempt is terminal
//! - Any received response is a success, whatever its status
//! - Every error raised by the HTTP client, or while decoding the body, counts
//!   as upstream unreachable
//! - A referrer that is not a legal header value fails before the client is
//!   involved and is an internal error
//! - Compressed bodies are decoded here, not by the client, so the upstream
//!   `Content-Encoding` can still be reported
//! - System proxy settings (`HTTP_PROXY`, `NO_PROXY`, ...) are honoured unless
//!   `upstream.system_proxy` is off

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, CONTENT_ENCODING};
use reqwest::Client;

use crate::config::{ConfigError, Credentials, GatewayConfig};
use crate::error::GatewayError;
use crate::forwarder::decode::decode_body;
use crate::forwarder::headers::{build_base_headers, with_referrer};
use crate::forwarder::result::{ForwardResult, ResponseData, UpstreamResponse};
use crate::forwarder::url::build_url;

/// Query parameters forwarded verbatim to the origin.
pub type ExtraParams = BTreeMap<String, String>;

/// One call's worth of forwarding input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardRequest {
    pub target_url: String,
    pub referrer: String,
    pub path_suffix: Option<String>,
    pub extra_params: ExtraParams,
}

impl ForwardRequest {
    /// Target URL with the path suffix applied.
    pub fn effective_url(&self) -> String {
        build_url(&self.target_url, self.path_suffix.as_deref())
    }
}

/// Stateless forwarder shared by all handlers.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    base_headers: Arc<HeaderMap>,
}

impl Forwarder {
    pub fn new(
        base_headers: HeaderMap,
        timeout: Duration,
        system_proxy: bool,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().timeout(timeout);
        if !system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_headers: Arc::new(base_headers),
        })
    }

    /// Build the forwarder from validated config and startup credentials.
    pub fn from_config(
        config: &GatewayConfig,
        credentials: &Credentials,
    ) -> Result<Self, ConfigError> {
        let headers = build_base_headers(&config.headers, credentials)?;
        let forwarder = Self::new(
            headers,
            config.timeouts.upstream(),
            config.upstream.system_proxy,
        )?;

        tracing::info!(
            timeout_secs = config.timeouts.upstream_secs,
            system_proxy = config.upstream.system_proxy,
            header_count = forwarder.base_headers.len(),
            "Forwarder initialized"
        );
        Ok(forwarder)
    }

    /// Forward a prepared request to its effective URL.
    pub async fn execute(&self, request: &ForwardRequest) -> ForwardResult {
        self.forward(
            &request.effective_url(),
            &request.referrer,
            &request.extra_params,
        )
        .await
    }

    /// Single GET to `target_url` with `extra_params` as the query string.
    pub async fn forward(
        &self,
        target_url: &str,
        referrer: &str,
        extra_params: &ExtraParams,
    ) -> ForwardResult {
        let headers = match with_referrer(&self.base_headers, referrer) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(target_url = %target_url, error = %e, "Invalid referrer");
                return GatewayError::Internal {
                    details: format!("invalid referrer header: {}", e),
                }
                .into();
            }
        };

        let start = Instant::now();
        let sent = self
            .client
            .get(target_url)
            .headers(headers)
            .query(extra_params)
            .send()
            .await;

        let response = match sent {
            Ok(r) => r,
            Err(e) => return upstream_failure(target_url, e),
        };

        let status_code = response.status().as_u16();
        let content_encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let raw = match response.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => return upstream_failure(target_url, e),
        };
        let body = match decode_body(content_encoding.as_deref(), raw) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(
                    target_url = %target_url,
                    content_encoding = ?content_encoding,
                    error = %e,
                    "Failed to decode upstream body"
                );
                return GatewayError::UpstreamUnreachable {
                    details: format!("failed to decode response body: {}", e),
                }
                .into();
            }
        };
        let data = ResponseData::from_body(String::from_utf8_lossy(&body).into_owned());

        tracing::debug!(
            target_url = %target_url,
            status = status_code,
            json = data.is_json(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        ForwardResult::Upstream(UpstreamResponse {
            status_code,
            content_encoding,
            data,
        })
    }
}

fn upstream_failure(target_url: &str, err: reqwest::Error) -> ForwardResult {
    tracing::warn!(
        target_url = %target_url,
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        error = %err,
        "Upstream request failed"
    );
    GatewayError::UpstreamUnreachable {
        details: err.to_string(),
    }
    .into()
}
