//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the waitlist gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, source key trust).
    pub listener: ListenerConfig,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Outbound email API settings.
    pub email: EmailConfig,

    /// Notification addressing and template labels.
    pub notification: NotificationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Take the source key from `X-Forwarded-For` instead of the peer address.
    /// Only enable behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            trust_forwarded_for: false,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The one origin allowed to call the gateway.
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "https://www.example.com".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Outbound email API call timeout in seconds.
    pub email_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            email_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024, // 16KB
        }
    }
}

/// Email API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Send through the API. When false, notifications are only logged.
    pub enabled: bool,

    /// Base URL of the email API.
    pub base_url: String,

    /// Sender address.
    pub sender: String,

    /// API token. Overridden by `WAITLIST_EMAIL_TOKEN` when set.
    pub authorization_token: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.postmarkapp.com".to_string(),
            sender: "waitlist@example.com".to_string(),
            authorization_token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Where signup notifications are delivered.
    pub recipient: String,

    pub subject: String,

    /// Site label shown in the "Signed up from" line.
    pub site: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipient: "waitlist@example.com".to_string(),
            subject: "Website Inbound Waitlist".to_string(),
            site: "www.example.com".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
