//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Define the JSON bodies of the submission endpoint
//! - Map each pipeline stage failure to a status code
//!
//! # Design Decisions
//! - Client-facing messages are fixed strings; causes stay in the logs
//! - Anything that is not a rate limit or validation failure is a 500

use std::time::Duration;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::notify::DeliveryError;
use crate::waitlist::InvalidSubmission;

pub const JOINED_MESSAGE: &str = "Successfully joined waitlist";
pub const INVALID_EMAIL_MESSAGE: &str = "Valid email is required";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const FAILED_MESSAGE: &str = "Failed to join waitlist";

#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

pub fn joined() -> Response {
    (
        StatusCode::OK,
        Json(SuccessBody {
            success: true,
            message: JOINED_MESSAGE,
        }),
    )
        .into_response()
}

/// Failure of one stage of the submission pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("malformed JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid submission: {0}")]
    Invalid(#[from] InvalidSubmission),

    #[error("notification delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl SubmitError {
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            SubmitError::Invalid(_) => StatusCode::BAD_REQUEST,
            SubmitError::Body(_) | SubmitError::Parse(_) | SubmitError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            SubmitError::RateLimited { .. } => RATE_LIMITED_MESSAGE,
            SubmitError::Invalid(_) => INVALID_EMAIL_MESSAGE,
            _ => FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let mut response = (
            self.status(),
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response();

        if let SubmitError::RateLimited { retry_after } = self {
            // Round up so clients never retry early.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_status_codes() {
        let limited = SubmitError::RateLimited { retry_after: Duration::from_secs(1) };
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        let invalid = SubmitError::from(InvalidSubmission::MalformedEmail);
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let parse = SubmitError::from(serde_json::from_str::<u8>("{").unwrap_err());
        assert_eq!(parse.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn retry_after_rounds_up() {
        let response = SubmitError::RateLimited {
            retry_after: Duration::from_millis(12_300),
        }
        .into_response();
        assert_eq!(response.headers()[header::RETRY_AFTER], "13");
    }
}
