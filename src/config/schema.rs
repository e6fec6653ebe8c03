//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Root configuration for the forwarding gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Outbound client behaviour.
    pub upstream: UpstreamConfig,

    /// Cross-origin settings for the inbound API.
    pub cors: CorsConfig,

    /// Where the outbound credentials come from.
    pub credentials: CredentialConfig,

    /// Static browser-fingerprint headers attached to every outbound call.
    pub headers: HeaderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Routing key → target definitions.
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Timeout configuration for outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one upstream request/response, in seconds.
    pub upstream_secs: u64,
}

impl TimeoutConfig {
    pub fn upstream(&self) -> Duration {
        Duration::from_secs(self.upstream_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { upstream_secs: 10 }
    }
}

/// Outbound client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Route upstream calls through the proxies named by `HTTP_PROXY`,
    /// `HTTPS_PROXY` and `NO_PROXY`.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { system_proxy: true }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow any origin to call the gateway.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Names of the environment variables holding outbound credentials.
///
/// Secrets never live in the config file itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Variable holding the bearer token sent as `Authorization: Bearer <token>`.
    pub bearer_token_env: String,

    /// Variable holding the value of the `client-id` header.
    pub client_id_env: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            bearer_token_env: "GATEWAY_BEARER_TOKEN".to_string(),
            client_id_env: "GATEWAY_CLIENT_ID".to_string(),
        }
    }
}

/// Browser fingerprint sent with every outbound request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub user_agent: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_mobile: String,
    pub sec_ch_ua_platform: String,
    pub accept: String,
    pub accept_encoding: String,
    pub accept_language: String,
    pub sec_fetch_site: String,
    pub sec_fetch_mode: String,
    pub sec_fetch_dest: String,

    /// Additional static headers (name → value).
    pub extra: BTreeMap<String, String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36 Edg/142.0.0.0"
                .to_string(),
            sec_ch_ua: r#""Chromium";v="142", "Microsoft Edge";v="142", "Not_A Brand";v="99""#
                .to_string(),
            sec_ch_ua_mobile: "?0".to_string(),
            sec_ch_ua_platform: r#""Windows""#.to_string(),
            accept: "*/*".to_string(),
            accept_encoding: "gzip, deflate".to_string(),
            accept_language: "en-US,en;q=0.9,en-IN;q=0.8".to_string(),
            sec_fetch_site: "same-origin".to_string(),
            sec_fetch_mode: "cors".to_string(),
            sec_fetch_dest: "empty".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A preconfigured forwarding target.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// Absolute origin URL.
    pub url: String,

    /// Value sent as the `Referer` header.
    pub referrer: String,

    /// Informational text shown by the listing endpoint.
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
        assert_eq!(config.timeouts.upstream(), Duration::from_secs(10));
        assert!(config.cors.enabled);
        assert!(config.upstream.system_proxy);
        assert_eq!(config.headers.accept_encoding, "gzip, deflate");
        assert!(!config.observability.metrics_enabled);
        assert!(config.targets.is_empty());
        assert_eq!(config.headers.sec_ch_ua_platform, "\"Windows\"");
    }

    #[test]
    fn test_parse_targets() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [timeouts]
            upstream_secs = 3

            [upstream]
            system_proxy = false

            [targets.10Aarambh]
            url = "https://example.test/api/10"
            referrer = "https://example.test/courses/10"
            description = "10th grade"

            [targets.bare]
            url = "https://example.test/api"
            referrer = "https://example.test"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeouts.upstream_secs, 3);
        assert!(!config.upstream.system_proxy);
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets["10Aarambh"].description, "10th grade");
        assert_eq!(config.targets["bare"].description, "");
        // untouched sections fall back to defaults
        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
    }
}
