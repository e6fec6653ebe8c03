//! Static routing-key lookup.

use std::collections::BTreeMap;

use crate::config::TargetConfig;
use crate::error::{GatewayError, GatewayResult};

/// A configured origin reachable through a routing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub url: String,
    pub referrer: String,
    pub description: String,
}

impl From<TargetConfig> for TargetSpec {
    fn from(config: TargetConfig) -> Self {
        Self {
            url: config.url,
            referrer: config.referrer,
            description: config.description,
        }
    }
}

/// Immutable map from routing key to target, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: BTreeMap<String, TargetSpec>,
}

impl TargetRegistry {
    pub fn from_config(targets: BTreeMap<String, TargetConfig>) -> Self {
        Self {
            targets: targets
                .into_iter()
                .map(|(key, config)| (key, TargetSpec::from(config)))
                .collect(),
        }
    }

    /// Look up a routing key.
    pub fn resolve_target(&self, key: &str) -> GatewayResult<&TargetSpec> {
        self.targets
            .get(key)
            .ok_or_else(|| GatewayError::UnknownTarget(key.to_string()))
    }

    /// All targets, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetSpec)> {
        self.targets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
