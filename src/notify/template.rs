use chrono::SecondsFormat;

use crate::waitlist::WaitlistSignup;

/// Fixed notification layout with configurable subject and site label.
#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    subject: String,
    site: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl NotificationTemplate {
    pub fn new(subject: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            site: site.into(),
        }
    }

    pub fn render(&self, signup: &WaitlistSignup) -> RenderedNotification {
        let email = signup.submission.email.as_str();
        let company = signup.submission.company.as_str();
        let source = signup.source.as_str();
        let timestamp = signup
            .submitted_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let site = self.site.as_str();

        let text_body = format!(
            "New waitlist signup:\n\n\
             Email: {email}\n\
             Company: {company}\n\
             IP: {source}\n\n\
             Signed up from: {site}\n\
             Timestamp: {timestamp}"
        );

        let html_body = format!(
            "<h2>New Waitlist Signup</h2>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Company:</strong> {}</p>\n\
             <p><strong>IP:</strong> {}</p>\n\
             <hr>\n\
             <p><small>Signed up from: {}<br>\n\
             Timestamp: {}</small></p>",
            escape_html(email),
            escape_html(company),
            escape_html(source),
            escape_html(site),
            timestamp,
        );

        RenderedNotification {
            subject: self.subject.clone(),
            text_body,
            html_body,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
