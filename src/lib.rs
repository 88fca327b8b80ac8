//! Waitlist signup gateway.
//!
//! Accepts `{email, company}` submissions from the marketing site, rate
//! limits them per source, validates them, and forwards each admitted
//! signup as a notification email.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod security;
pub mod waitlist;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
