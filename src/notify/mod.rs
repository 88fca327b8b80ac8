//! Signup notification delivery.
//!
//! # Data Flow
//! ```text
//! WaitlistSignup
//!     → template.rs (subject, plain text, HTML)
//!     → notifier.rs (address to the fixed recipient)
//!     → sender.rs (EmailSender: HTTP email API or log-only)
//! ```
//!
//! # Design Decisions
//! - The email service is behind a trait so handlers never see transport details
//! - No retries; a failed send fails the request

pub mod notifier;
pub mod sender;
pub mod template;

pub use notifier::Notifier;
pub use sender::{DeliveryError, EmailSender, HttpEmailClient, LogEmailSender, OutboundEmail};
pub use template::{NotificationTemplate, RenderedNotification};
