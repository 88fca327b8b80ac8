//! Submission endpoint.
//!
//! Stages run in order and stop at the first failure:
//! rate limit → read body → parse → validate → notify.

use std::time::SystemTime;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::http::request::{request_id, source_key};
use crate::http::response::{self, SubmitError};
use crate::http::server::AppState;
use crate::security::RateDecision;
use crate::waitlist::{Submission, SubmissionRequest, WaitlistSignup};

pub async fn submit_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let source = source_key(&request, state.trust_forwarded_for);
    let request_id = request_id(&request).to_string();

    match process_submission(&state, &source, request).await {
        Ok(()) => response::joined(),
        Err(err) => {
            match &err {
                SubmitError::RateLimited { retry_after } => {
                    tracing::warn!(request_id = %request_id, source = %source, retry_after = ?retry_after, "Rate limit exceeded");
                }
                SubmitError::Invalid(reason) => {
                    tracing::info!(request_id = %request_id, source = %source, reason = %reason, "Rejected submission");
                }
                other => {
                    tracing::error!(request_id = %request_id, source = %source, error = %other, "Failed to process submission");
                }
            }
            err.into_response()
        }
    }
}

async fn process_submission(
    state: &AppState,
    source: &str,
    request: Request<Body>,
) -> Result<(), SubmitError> {
    match state.limiter.check(source, SystemTime::now()) {
        RateDecision::Limited { retry_after } => {
            return Err(SubmitError::RateLimited { retry_after });
        }
        RateDecision::Admitted { remaining } => {
            tracing::debug!(source = %source, remaining, "Rate limit check passed");
        }
    }

    let bytes = axum::body::to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .map_err(SubmitError::Body)?;
    let payload: SubmissionRequest = serde_json::from_slice(&bytes)?;
    let submission = Submission::try_from(payload)?;

    tracing::debug!(email = %submission.email, company = %submission.company, "Submission validated");

    let signup = WaitlistSignup::new(submission, source, Utc::now());
    state.notifier.notify(&signup).await?;

    tracing::info!(source = %source, "Waitlist signup delivered");
    Ok(())
}
