use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// A fully addressed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("email API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid email API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// The external email-sending service.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DeliveryError>;
}

/// Client for a Postmark-style HTTP email API.
#[derive(Debug, Clone)]
pub struct HttpEmailClient {
    http: Client,
    base_url: Url,
    sender: String,
    authorization_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl HttpEmailClient {
    pub fn new(
        base_url: &str,
        sender: impl Into<String>,
        authorization_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: directory_url(base_url)?,
            sender: sender.into(),
            authorization_token: authorization_token.into(),
        })
    }
}

/// Parse `raw` so that relative joins append to its path instead of
/// replacing the last segment.
fn directory_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl EmailSender for HttpEmailClient {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DeliveryError> {
        let url = self.base_url.join("email")?;
        let body = SendEmailRequest {
            from: &self.sender,
            to: &email.to,
            subject: &email.subject,
            html_body: &email.html_body,
            text_body: &email.text_body,
        };

        self.http
            .post(url)
            .header("X-Postmark-Server-Token", &self.authorization_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DeliveryError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Email delivery disabled, notification logged only"
        );
        tracing::debug!(body = %email.text_body, "Notification body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let base = directory_url("https://mail.internal/api/v1").unwrap();
        assert_eq!(base.join("email").unwrap().as_str(), "https://mail.internal/api/v1/email");

        let base = directory_url("https://mail.internal/api/v1/").unwrap();
        assert_eq!(base.join("email").unwrap().as_str(), "https://mail.internal/api/v1/email");
    }

    #[test]
    fn endpoint_at_host_root() {
        let base = directory_url("http://127.0.0.1:8025").unwrap();
        assert_eq!(base.join("email").unwrap().as_str(), "http://127.0.0.1:8025/email");
    }
}
