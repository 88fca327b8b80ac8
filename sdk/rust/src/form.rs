//! Signup form state.

use std::time::Duration;

use crate::client::{validate_email, WaitlistClient};

/// How long the button shows a result before returning to idle.
pub const RESET_AFTER: Duration = Duration::from_secs(3);

const WELCOME_COLOR: &str = "#059669";
const ERROR_COLOR: &str = "#dc2626";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Idle,
    Joining,
    Welcomed,
    Failed,
}

impl SubmitButton {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitButton::Idle => "JOIN WAITLIST →",
            SubmitButton::Joining => "JOINING...",
            SubmitButton::Welcomed => "WELCOME ABOARD",
            SubmitButton::Failed => "ERROR - TRY AGAIN",
        }
    }

    pub fn background(&self) -> Option<&'static str> {
        match self {
            SubmitButton::Welcomed => Some(WELCOME_COLOR),
            SubmitButton::Failed => Some(ERROR_COLOR),
            _ => None,
        }
    }

    pub fn disabled(&self) -> bool {
        !matches!(self, SubmitButton::Idle)
    }
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Email failed the local check; nothing was sent.
    Skipped,
    Joined,
    Failed,
}

#[derive(Debug)]
pub struct WaitlistForm {
    pub email: String,
    pub company: String,
    button: SubmitButton,
}

impl WaitlistForm {
    pub fn new(email: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            company: company.into(),
            button: SubmitButton::Idle,
        }
    }

    pub fn button(&self) -> SubmitButton {
        self.button
    }

    /// Submit the form through `client`.
    ///
    /// The button is left in its result state; call [`settle`](Self::settle)
    /// to return it to idle.
    pub async fn submit(&mut self, client: &WaitlistClient) -> FormOutcome {
        if self.button.disabled() {
            return FormOutcome::Skipped;
        }

        let email = self.email.trim().to_string();
        let company = self.company.trim().to_string();

        if email.is_empty() || !validate_email(&email) {
            return FormOutcome::Skipped;
        }

        self.button = SubmitButton::Joining;

        match client.join(&email, &company).await {
            Ok(_) => {
                self.button = SubmitButton::Welcomed;
                self.email.clear();
                self.company.clear();
                FormOutcome::Joined
            }
            Err(_) => {
                self.button = SubmitButton::Failed;
                FormOutcome::Failed
            }
        }
    }

    /// Wait out the result display, then re-enable the button.
    pub async fn settle(&mut self) {
        if matches!(self.button, SubmitButton::Idle) {
            return;
        }
        tokio::time::sleep(RESET_AFTER).await;
        self.button = SubmitButton::Idle;
    }
}
