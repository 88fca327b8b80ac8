//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, source key)
//!     → submit.rs (rate limit → parse → validate → notify)
//!     → response.rs (JSON body, status mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod submit;

pub use request::{source_key, UuidRequestId, UNKNOWN_REQUEST_ID, UNKNOWN_SOURCE, X_REQUEST_ID};
pub use response::SubmitError;
pub use server::{AppState, HttpServer, ServerError};
