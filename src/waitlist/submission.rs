use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::waitlist::{CompanyName, WaitlistEmail};

/// Why a submission was refused before any side effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSubmission {
    #[error("email is missing")]
    MissingEmail,

    #[error("email is malformed")]
    MalformedEmail,

    #[error("email exceeds {} characters", crate::waitlist::MAX_EMAIL_CHARS)]
    EmailTooLong,
}

/// The untrusted request body.
///
/// `email` is kept as a raw JSON value so that a non-string email is a
/// validation failure rather than a parse failure.
#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub email: Option<Value>,

    #[serde(default)]
    pub company: Option<String>,
}

/// A sanitized submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub email: WaitlistEmail,
    pub company: CompanyName,
}

impl TryFrom<SubmissionRequest> for Submission {
    type Error = InvalidSubmission;

    fn try_from(request: SubmissionRequest) -> Result<Self, Self::Error> {
        let email = match request.email {
            None | Some(Value::Null) => return Err(InvalidSubmission::MissingEmail),
            Some(Value::String(raw)) => WaitlistEmail::parse(&raw)?,
            Some(_) => return Err(InvalidSubmission::MalformedEmail),
        };
        let company = CompanyName::from_optional(request.company.as_deref());

        Ok(Self { email, company })
    }
}

/// An admitted, validated signup with its delivery context.
#[derive(Debug, Clone)]
pub struct WaitlistSignup {
    pub submission: Submission,
    /// Rate limit source key (client IP or `unknown`).
    pub source: String,
    pub submitted_at: DateTime<Utc>,
}

impl WaitlistSignup {
    pub fn new(submission: Submission, source: impl Into<String>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            submission,
            source: source.into(),
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waitlist::COMPANY_PLACEHOLDER;

    fn parse(body: &str) -> Result<Submission, InvalidSubmission> {
        let request: SubmissionRequest = serde_json::from_str(body).unwrap();
        Submission::try_from(request)
    }

    #[test]
    fn full_submission() {
        let submission = parse(r#"{"email":"Founder@Startup.io","company":"  Startup  "}"#).unwrap();
        assert_eq!(submission.email.as_str(), "founder@startup.io");
        assert_eq!(submission.company.as_str(), "Startup");
    }

    #[test]
    fn company_is_optional() {
        let submission = parse(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(submission.company.as_str(), COMPANY_PLACEHOLDER);
    }

    #[test]
    fn missing_or_null_email() {
        assert_eq!(parse(r#"{"company":"Acme"}"#), Err(InvalidSubmission::MissingEmail));
        assert_eq!(parse(r#"{"email":null}"#), Err(InvalidSubmission::MissingEmail));
        assert_eq!(parse(r#"{"email":""}"#), Err(InvalidSubmission::MissingEmail));
    }

    #[test]
    fn non_string_email_is_invalid() {
        assert_eq!(parse(r#"{"email":42}"#), Err(InvalidSubmission::MalformedEmail));
    }

    #[test]
    fn non_string_company_fails_to_parse() {
        assert!(serde_json::from_str::<SubmissionRequest>(r#"{"email":"a@b.co","company":7}"#).is_err());
    }
}
