//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{CredentialConfig, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid outbound header '{0}'")]
    Header(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Outbound credentials resolved once at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub bearer_token: Option<String>,
    pub client_id: Option<String>,
}

impl Credentials {
    /// Read the configured environment variables. Empty values count as unset.
    pub fn from_env(config: &CredentialConfig) -> Self {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(config: &CredentialConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let credentials = Self {
            bearer_token: read(&config.bearer_token_env),
            client_id: read(&config.client_id_env),
        };

        if credentials.bearer_token.is_none() {
            tracing::warn!(
                variable = %config.bearer_token_env,
                "Bearer token not set; outbound requests carry no Authorization header"
            );
        }
        if credentials.client_id.is_none() {
            tracing::warn!(
                variable = %config.client_id_env,
                "Client id not set; outbound requests carry no client-id header"
            );
        }

        credentials
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_config_rejects_invalid_target() {
        let err = parse_config(
            r#"
            [targets.broken]
            url = "not a url"
            referrer = "https://x.test"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config(include_str!("../../gateway.example.toml")).unwrap();
        assert_eq!(config.targets.len(), 6);
        assert_eq!(
            config.targets["10AbhayBatch"].referrer,
            "https://theeduverse.xyz/courses/details/39904"
        );
    }

    #[test]
    fn test_parse_config_syntax_error() {
        let err = parse_config("[targets.x\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_credentials_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("GATEWAY_BEARER_TOKEN", "tok"),
            ("GATEWAY_CLIENT_ID", " "),
        ]
        .into_iter()
        .collect();

        let creds = Credentials::from_lookup(&CredentialConfig::default(), |name| {
            env.get(name).map(|v| v.to_string())
        });
        assert_eq!(creds.bearer_token.as_deref(), Some("tok"));
        assert_eq!(creds.client_id, None);
        assert!(!format!("{:?}", creds).contains("tok"));
    }
}
