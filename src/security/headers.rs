//! CORS response headers.
//!
//! # Responsibilities
//! - Stamp the single allowed origin on every response
//! - Answer preflight requests with the allowed headers and methods
//!
//! # Design Decisions
//! - One fixed origin, no wildcard
//! - Preflight never reaches the rate limiter or validator

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Layer adding `Access-Control-Allow-Origin` to every response.
pub fn allow_origin_layer(origin: HeaderValue) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin)
}

fn preflight_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
    ]
}

/// `OPTIONS` handler: 200, CORS headers, empty body.
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, preflight_headers())
}
