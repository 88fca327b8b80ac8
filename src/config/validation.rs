//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check addresses and URLs parse before the server starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::waitlist::WaitlistEmail;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    check_origin(&config.cors.allowed_origin, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.email_secs == 0 {
        errors.push(ValidationError::new("timeouts.email_secs", "must be greater than 0"));
    }
    if config.security.max_body_bytes == 0 {
        errors.push(ValidationError::new("security.max_body_bytes", "must be greater than 0"));
    }

    if WaitlistEmail::parse(&config.notification.recipient).is_err() {
        errors.push(ValidationError::new(
            "notification.recipient",
            format!("'{}' is not a valid email", config.notification.recipient),
        ));
    }
    if WaitlistEmail::parse(&config.email.sender).is_err() {
        errors.push(ValidationError::new(
            "email.sender",
            format!("'{}' is not a valid email", config.email.sender),
        ));
    }

    if config.email.enabled {
        if Url::parse(&config.email.base_url).is_err() {
            errors.push(ValidationError::new(
                "email.base_url",
                format!("'{}' is not a URL", config.email.base_url),
            ));
        }
        if config.email.authorization_token.trim().is_empty() {
            errors.push(ValidationError::new(
                "email.authorization_token",
                "required when email delivery is enabled",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_origin(origin: &str, errors: &mut Vec<ValidationError>) {
    let valid_url = Url::parse(origin)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false);

    if !valid_url || HeaderValue::from_str(origin).is_err() {
        errors.push(ValidationError::new(
            "cors.allowed_origin",
            format!("'{}' is not an http(s) origin", origin),
        ));
    }
}
