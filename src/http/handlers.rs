//! Route handlers: target listing, forward by key, forward by explicit target.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::GatewayError;
use crate::forwarder::ForwardRequest;
use crate::http::request::{request_id_of, QueryParams};
use crate::http::response::{EndpointInfo, ForwardEnvelope, TargetListing};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query key naming the routing key.
pub const PARAM_KEY: &str = "get";
/// Query key carrying the optional path suffix.
pub const PARAM_PATH: &str = "path";
/// Query key carrying the explicit target URL.
pub const PARAM_URL: &str = "url";
/// Query key carrying the explicit referrer.
pub const PARAM_REFERRER: &str = "referrer";

const MODE_BY_KEY: &str = "by_key";
const MODE_BY_TARGET: &str = "by_target";

/// `GET /`: configured routing keys, for discovery.
pub async fn list_targets(State(state): State<AppState>) -> Json<TargetListing> {
    let available_endpoints = state
        .registry
        .iter()
        .map(|(key, spec)| {
            (
                key.to_string(),
                EndpointInfo {
                    description: spec.description.clone(),
                    example_url: format!("/api?{}={}", PARAM_KEY, key),
                },
            )
        })
        .collect();

    Json(TargetListing {
        message: "API Proxy Server Active.",
        available_endpoints,
    })
}

/// `GET /api?get=<key>[&path=<suffix>]`: forward to a configured target.
pub async fn forward_by_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&headers);
    let params = QueryParams::new(pairs);

    let Some(key) = params.get(PARAM_KEY) else {
        return reject(
            MODE_BY_KEY,
            &request_id,
            GatewayError::MissingParameter(format!("Missing '{}' parameter.", PARAM_KEY)),
        );
    };

    let spec = match state.registry.resolve_target(key) {
        Ok(spec) => spec,
        Err(e) => return reject(MODE_BY_KEY, &request_id, e),
    };

    let request = ForwardRequest {
        target_url: spec.url.clone(),
        referrer: spec.referrer.clone(),
        path_suffix: params.get(PARAM_PATH).map(str::to_string),
        extra_params: params.extra_excluding(&[PARAM_KEY, PARAM_PATH]),
    };
    let target_url_used = request.effective_url();

    tracing::debug!(
        request_id = %request_id,
        config_id = %key,
        target_url = %target_url_used,
        params = request.extra_params.len(),
        "Forwarding by key"
    );

    let result = state.forwarder.execute(&request).await;
    let envelope = ForwardEnvelope::by_key(key, target_url_used, result);
    finish(MODE_BY_KEY, &request_id, envelope, start)
}

/// `GET /test?url=<url>&referrer=<referrer>[&path=<suffix>]`: forward to an explicit target.
pub async fn forward_by_target(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&headers);
    let params = QueryParams::new(pairs);

    let (Some(target_url), Some(referrer)) = (params.get(PARAM_URL), params.get(PARAM_REFERRER))
    else {
        return reject(
            MODE_BY_TARGET,
            &request_id,
            GatewayError::MissingParameter("Missing url or referrer.".to_string()),
        );
    };

    let request = ForwardRequest {
        target_url: target_url.to_string(),
        referrer: referrer.to_string(),
        path_suffix: params.get(PARAM_PATH).map(str::to_string),
        extra_params: params.extra_excluding(&[PARAM_URL, PARAM_REFERRER, PARAM_PATH]),
    };
    let target_url_used = request.effective_url();

    tracing::debug!(
        request_id = %request_id,
        target_url = %target_url_used,
        referrer = %referrer,
        params = request.extra_params.len(),
        "Forwarding to explicit target"
    );

    let result = state.forwarder.execute(&request).await;
    let envelope = ForwardEnvelope::by_target(target_url_used, referrer, result);
    finish(MODE_BY_TARGET, &request_id, envelope, start)
}

fn reject(mode: &'static str, request_id: &str, err: GatewayError) -> Response {
    tracing::warn!(
        request_id = %request_id,
        mode,
        kind = err.kind().as_str(),
        error = %err,
        "Request rejected"
    );
    metrics::record_rejected(mode, err.status_code().as_u16());
    err.into_response()
}

fn finish(
    mode: &'static str,
    request_id: &str,
    envelope: ForwardEnvelope,
    start: Instant,
) -> Response {
    let status = envelope.status();
    tracing::info!(
        request_id = %request_id,
        mode,
        target_url = %envelope.target_url_used,
        status = status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Forward complete"
    );
    metrics::record_forward(mode, status.as_u16(), start);
    envelope.into_response()
}
