/// Longest company name kept, in characters.
pub const MAX_COMPANY_CHARS: usize = 100;

/// Used when no company was given.
pub const COMPANY_PLACEHOLDER: &str = "Not provided";

/// A trimmed, length-capped company name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    /// Sanitize an optional company field.
    ///
    /// Only an absent or empty field becomes the placeholder. A field of
    /// spaces was still supplied and trims down to an empty name.
    pub fn from_optional(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self(COMPANY_PLACEHOLDER.to_string()),
            Some(raw) => Self(raw.trim().chars().take(MAX_COMPANY_CHARS).collect()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompanyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_limit() {
        let long = "x".repeat(150);
        let company = CompanyName::from_optional(Some(&long));
        assert_eq!(company.as_str().chars().count(), MAX_COMPANY_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let company = CompanyName::from_optional(Some(&long));
        assert_eq!(company.as_str(), "é".repeat(100));
    }

    #[test]
    fn trims_before_truncating() {
        let padded = format!("   {}   ", "y".repeat(100));
        let company = CompanyName::from_optional(Some(&padded));
        assert_eq!(company.as_str(), "y".repeat(100));
    }

    #[test]
    fn absent_or_empty_is_placeholder() {
        assert_eq!(CompanyName::from_optional(None).as_str(), COMPANY_PLACEHOLDER);
        assert_eq!(CompanyName::from_optional(Some("")).as_str(), COMPANY_PLACEHOLDER);
    }

    #[test]
    fn whitespace_only_trims_to_empty() {
        assert_eq!(CompanyName::from_optional(Some("   ")).as_str(), "");
    }

    #[test]
    fn keeps_short_names() {
        assert_eq!(CompanyName::from_optional(Some(" Acme ")).as_str(), "Acme");
    }
}
