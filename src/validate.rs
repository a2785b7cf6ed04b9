//! Shared field-validation helpers for service inputs.

use regex_lite::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Loose mailbox shape check: something@domain.tld, no whitespace.
pub fn email_valid(email: &str) -> bool {
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));
    re.is_match(email)
}

/// Whether a required text field carries any non-whitespace content.
pub fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(email_valid("jane@example.com"));
        assert!(email_valid("jane+tag@sub.example.co"));
        assert!(!email_valid("jane@example"));
        assert!(!email_valid("jane example@x.y"));
        assert!(!email_valid("@example.com"));
        assert!(!email_valid(""));
    }

    #[test]
    fn test_present() {
        assert!(present("x"));
        assert!(!present(""));
        assert!(!present("   \t"));
    }
}
