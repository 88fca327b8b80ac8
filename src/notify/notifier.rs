use std::sync::Arc;

use crate::notify::{DeliveryError, EmailSender, NotificationTemplate, OutboundEmail};
use crate::waitlist::WaitlistSignup;

/// Renders signups and sends them to the operator's inbox.
#[derive(Clone)]
pub struct Notifier {
    recipient: String,
    template: NotificationTemplate,
    sender: Arc<dyn EmailSender>,
}

impl Notifier {
    pub fn new(
        recipient: impl Into<String>,
        template: NotificationTemplate,
        sender: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            template,
            sender,
        }
    }

    pub fn compose(&self, signup: &WaitlistSignup) -> OutboundEmail {
        let rendered = self.template.render(signup);
        OutboundEmail {
            to: self.recipient.clone(),
            subject: rendered.subject,
            text_body: rendered.text_body,
            html_body: rendered.html_body,
        }
    }

    pub async fn notify(&self, signup: &WaitlistSignup) -> Result<(), DeliveryError> {
        let email = self.compose(signup);
        self.sender.send(&email).await
    }
}
