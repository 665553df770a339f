//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose RFC 5322 shape: one `@`, no whitespace, a dotted domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email regex is valid")
});

/// Minimum accepted password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum accepted password length (bcrypt only reads the first 72 bytes)
pub const PASSWORD_MAX_LENGTH: usize = 72;

/// Maximum accepted display name length
pub const NAME_MAX_LENGTH: usize = 100;

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if a string is not empty
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string length (in chars) is within bounds
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Check that a password satisfies the length policy
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= PASSWORD_MIN_LENGTH && password.len() <= PASSWORD_MAX_LENGTH
}
