//! Outbound header set.
//!
//! # Responsibilities
//! - Build the static browser-fingerprint header map once at startup
//! - Fold in the bearer credential and client id
//! - Set the per-call `Referer` on a copy of that map
//!
//! # Design Decisions
//! - Inbound request headers are never copied to the upstream
//! - Configured `extra` headers are applied after the fingerprint, so they can override it
//! - `Referer` is always set last and always wins

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, AUTHORIZATION,
    REFERER, USER_AGENT,
};

use crate::config::{ConfigError, Credentials, HeaderConfig};

pub const CLIENT_ID: &str = "client-id";

/// Build the base header map shared by every outbound call.
pub fn build_base_headers(
    config: &HeaderConfig,
    credentials: &Credentials,
) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    let fingerprint: [(&str, &str); 10] = [
        ("sec-ch-ua-platform", config.sec_ch_ua_platform.as_str()),
        (USER_AGENT.as_str(), config.user_agent.as_str()),
        ("sec-ch-ua", config.sec_ch_ua.as_str()),
        ("sec-ch-ua-mobile", config.sec_ch_ua_mobile.as_str()),
        (ACCEPT.as_str(), config.accept.as_str()),
        (ACCEPT_ENCODING.as_str(), config.accept_encoding.as_str()),
        ("sec-fetch-site", config.sec_fetch_site.as_str()),
        ("sec-fetch-mode", config.sec_fetch_mode.as_str()),
        ("sec-fetch-dest", config.sec_fetch_dest.as_str()),
        (ACCEPT_LANGUAGE.as_str(), config.accept_language.as_str()),
    ];
    for (name, value) in fingerprint {
        if !value.is_empty() {
            insert(&mut headers, name, value)?;
        }
    }

    for (name, value) in &config.extra {
        insert(&mut headers, name, value)?;
    }

    if let Some(token) = &credentials.bearer_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ConfigError::Header(AUTHORIZATION.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    if let Some(client_id) = &credentials.client_id {
        let mut value = HeaderValue::from_str(client_id)
            .map_err(|_| ConfigError::Header(CLIENT_ID.to_string()))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(CLIENT_ID), value);
    }

    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), ConfigError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ConfigError::Header(name.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|_| ConfigError::Header(name.to_string()))?;
    headers.insert(header_name, header_value);
    Ok(())
}

/// Copy of `base` with `Referer` set to `referrer`.
///
/// Fails when `referrer` is not a legal header value.
pub fn with_referrer(
    base: &HeaderMap,
    referrer: &str,
) -> Result<HeaderMap, reqwest::header::InvalidHeaderValue> {
    let mut headers = base.clone();
    headers.insert(REFERER, HeaderValue::from_str(referrer)?);
    Ok(headers)
}
