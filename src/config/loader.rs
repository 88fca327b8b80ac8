//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `email.authorization_token`.
pub const EMAIL_TOKEN_ENV: &str = "WAITLIST_EMAIL_TOKEN";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
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
    let mut config: GatewayConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(token) = std::env::var(EMAIL_TOKEN_ENV) {
        if !token.is_empty() {
            config.email.authorization_token = token;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(!config.email.enabled);
        assert_eq!(config.notification.subject, "Website Inbound Waitlist");
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"
            trust_forwarded_for = true

            [cors]
            allowed_origin = "https://www.anjunalabs.ai"

            [notification]
            recipient = "team@anjunalabs.ai"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert!(config.listener.trust_forwarded_for);
        assert_eq!(config.cors.allowed_origin, "https://www.anjunalabs.ai");
        assert_eq!(config.notification.recipient, "team@anjunalabs.ai");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn sample_config_is_valid() {
        let config = parse_config(include_str!("../../waitlist.toml")).unwrap();
        assert_eq!(config.security.max_body_bytes, 16384);
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn semantic_errors_are_collected() {
        let err = parse_config(
            r#"
            [listener]
            bind_address = "nowhere"

            [notification]
            recipient = "not-an-email"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
