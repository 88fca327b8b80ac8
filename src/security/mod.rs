//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (preflight answered here; origin header on every response)
//!     → rate_limit.rs (check per-source sliding window)
//!     → Pass to validation
//! ```
//!
//! # Design Decisions
//! - Rate limiting runs before the body is read
//! - The ledger is injected, not global
//! - Rejected requests do not consume window slots

pub mod headers;
pub mod rate_limit;

pub use rate_limit::{AdmissionGate, InMemoryLedger, LedgerStore, RateDecision, SlidingWindowLimiter};
