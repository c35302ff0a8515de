use crate::domain::contact::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

// `.+@.+\..+` where `.` stops at line terminators, matched anywhere in the input.
static LOOSE_ADDRESS_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\n\r\x{2028}\x{2029}]+@[^\n\r\x{2028}\x{2029}]+\.[^\n\r\x{2028}\x{2029}]+")
        .expect("Email shape pattern is valid")
});

/// Submitter address. Only the loose shape `<local>@<domain>.<tld>` is
/// checked; deliverability is never probed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenderEmail(String);

impl SenderEmail {
    pub fn parse(s: String) -> Result<SenderEmail, ValidationError> {
        if LOOSE_ADDRESS_SHAPE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }
}

impl AsRef<str> for SenderEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SenderEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
