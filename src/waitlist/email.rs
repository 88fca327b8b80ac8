use crate::waitlist::InvalidSubmission;

/// Upper bound on the raw address length, in UTF-16 code units.
pub const MAX_EMAIL_CHARS: usize = 254;

/// A validated, normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    /// Validate `raw` and normalize it.
    ///
    /// The accepted shape is deliberately loose: one `@`, something before it,
    /// a dotted domain after it, and no whitespace anywhere.
    pub fn parse(raw: &str) -> Result<Self, InvalidSubmission> {
        if raw.is_empty() {
            return Err(InvalidSubmission::MissingEmail);
        }
        if raw.encode_utf16().count() > MAX_EMAIL_CHARS {
            return Err(InvalidSubmission::EmailTooLong);
        }
        if !has_email_shape(raw) {
            return Err(InvalidSubmission::MalformedEmail);
        }

        Ok(Self(raw.trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_email_shape(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
