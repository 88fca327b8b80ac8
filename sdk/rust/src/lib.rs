//! Client for the waitlist gateway.
//!
//! Mirrors the signup form on the marketing site: the email is checked
//! locally before any request is made, and the submit button walks through
//! a fixed label cycle while the request is in flight.

pub mod client;
pub mod form;

pub use client::{validate_email, ClientError, JoinRequest, JoinResponse, WaitlistClient};
pub use form::{FormOutcome, SubmitButton, WaitlistForm, RESET_AFTER};
