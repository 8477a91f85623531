//! Email and phone normalization for subscriber handling.
//!
//! The subscriber store wants lowercase emails, E.164 phone numbers, and
//! first/last name attributes. Ghana (+233) is the default dialing prefix
//! for numbers submitted in local format.

use validator::ValidateEmail;

/// Default country dialing prefix for locally formatted numbers.
const DEFAULT_DIALING_PREFIX: &str = "+233";

/// Syntactic email check. Anything failing this is rejected before any
/// upsert is attempted.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Trim and lowercase an email for storage and dedup.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize a phone number toward E.164, defaulting to Ghana.
///
/// - `0XXXXXXXXX` (local format) becomes `+233XXXXXXXXX`
/// - `233…` gains a leading `+`
/// - numbers already starting with `+` pass through
/// - anything else is assumed local and gains the `+233` prefix
///
/// Returns `None` for an empty input.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let phone = raw.trim();
    if phone.is_empty() {
        return None;
    }
    let normalized = if let Some(rest) = phone.strip_prefix('0') {
        format!("{DEFAULT_DIALING_PREFIX}{rest}")
    } else if phone.starts_with('+') {
        phone.to_string()
    } else if phone.starts_with("233") {
        format!("+{phone}")
    } else {
        format!("{DEFAULT_DIALING_PREFIX}{phone}")
    };
    Some(normalized)
}

/// Split a full name into first name and an optional remainder.
pub fn split_name(full: &str) -> (String, Option<String>) {
    let mut parts = full.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        (first, None)
    } else {
        (first, Some(rest.join(" ")))
    }
}
