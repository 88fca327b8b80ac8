//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! HTTP layer adds:
//!     → per-request span with method, path and request ID (TraceLayer)
//! ```
//!
//! # Design Decisions
//! - Structured fields, not interpolated strings
//! - Request ID flows through every log line of a request
//! - Submitted email addresses only appear at debug level

pub mod logging;

pub use logging::init_logging;
