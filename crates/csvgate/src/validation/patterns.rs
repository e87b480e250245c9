//! Fixed format checks for email and phone values.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Character classes are spelled out in ASCII so that non-Latin letters and
// digits never match.

/// Local part of word characters, `+`, `-` or `.`, then dot-separated
/// labels of letters, digits and hyphens ending in an alphabetic TLD.
pub const EMAIL_PATTERN: &str =
    r"(?i)\A[a-z0-9_+\-.]+@[a-z0-9\-]+(\.[a-z0-9\-]+)*\.[a-z]+\z";

/// Exactly 10 or 11 digits.
pub const PHONE_PATTERN: &str = r"\A[0-9]{10,11}\z";

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).unwrap());

/// Returns true if the whole value is email-shaped.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Returns true if the whole value is a 10 or 11 digit phone number.
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value)
}
