//! Submission validation.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → submission.rs (SubmissionRequest, untrusted)
//!     → email.rs (shape + length check, normalize)
//!     → company.rs (trim, truncate, placeholder)
//!     → Submission (sanitized, ready for notification)
//! ```
//!
//! # Design Decisions
//! - Validation happens before any outbound call
//! - Sanitized values are newtypes; nothing downstream sees raw input

pub mod company;
pub mod email;
pub mod submission;

pub use company::{CompanyName, COMPANY_PLACEHOLDER, MAX_COMPANY_CHARS};
pub use email::{WaitlistEmail, MAX_EMAIL_CHARS};
pub use submission::{InvalidSubmission, Submission, SubmissionRequest, WaitlistSignup};
