//! Request metadata.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Derive the rate limit source key from connection or proxy headers
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - `X-Forwarded-For` is ignored unless explicitly trusted
//! - Missing metadata degrades to the `unknown` source, never an error

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Request ID reported when none was assigned.
pub const UNKNOWN_REQUEST_ID: &str = "-";

/// Source key used when no client address is available.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Generates `x-request-id` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of `request`, or [`UNKNOWN_REQUEST_ID`] if none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN_REQUEST_ID)
}

/// Key the rate limiter buckets this request under.
pub fn source_key<B>(request: &Request<B>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(client) = forwarded {
            return client.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn with_peer(addr: &str) -> Request<Body> {
        let mut request = Request::new(Body::empty());
        let addr: SocketAddr = addr.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[test]
    fn request_id_fallback_is_not_the_source_sentinel() {
        let request = Request::new(Body::empty());
        assert_eq!(request_id(&request), UNKNOWN_REQUEST_ID);
        assert_ne!(UNKNOWN_REQUEST_ID, UNKNOWN_SOURCE);

        let mut request = Request::new(Body::empty());
        request
            .headers_mut()
            .insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&request), "abc-123");
    }

    #[test]
    fn peer_address_without_port() {
        let request = with_peer("198.51.100.4:51234");
        assert_eq!(source_key(&request, false), "198.51.100.4");
    }

    #[test]
    fn unknown_without_connection_info() {
        let request = Request::new(Body::empty());
        assert_eq!(source_key(&request, true), UNKNOWN_SOURCE);
    }

    #[test]
    fn forwarded_for_only_when_trusted() {
        let mut request = with_peer("10.0.0.2:443");
        request.headers_mut().insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );

        assert_eq!(source_key(&request, false), "10.0.0.2");
        assert_eq!(source_key(&request, true), "203.0.113.9");
    }

    #[test]
    fn blank_forwarded_for_falls_back() {
        let mut request = with_peer("10.0.0.2:443");
        request
            .headers_mut()
            .insert(X_FORWARDED_FOR, HeaderValue::from_static(" , 10.0.0.1"));
        assert_eq!(source_key(&request, true), "10.0.0.2");
    }
}
