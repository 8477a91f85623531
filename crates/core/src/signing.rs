//! Keyed-hash signature utilities for download links and gateway webhooks.
//!
//! Two pairings are deliberately kept separate: download capabilities are
//! HMAC-SHA256 over `:`-joined fields, while Paystack webhooks are
//! HMAC-SHA512 over the raw, unparsed request body. Both fail closed when
//! no secret is configured — there is no fallback key.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Separator placed between fields before signing.
pub const FIELD_SEPARATOR: &str = ":";

/// Error type for signing failures.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The signing secret is absent or empty. Nothing is ever signed or
    /// verified against a default key.
    #[error("signing secret is not configured")]
    EmptySecret,
}

// ---------------------------------------------------------------------------
// Field signatures (download capabilities)
// ---------------------------------------------------------------------------

/// Compute an HMAC-SHA256 hex signature over the ordered fields.
///
/// Fields are joined with [`FIELD_SEPARATOR`] in the order given; both the
/// separator and the order are part of the signed contract.
pub fn sign_fields(fields: &[&str], secret: &[u8]) -> Result<String, SigningError> {
    if secret.is_empty() {
        return Err(SigningError::EmptySecret);
    }
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(fields.join(FIELD_SEPARATOR).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a candidate signature over the ordered fields.
///
/// Returns `false` when the secret is empty, when the candidate length does
/// not match the expected digest length, or when the constant-time compare
/// fails. Never panics on attacker-controlled input.
pub fn verify_fields(fields: &[&str], secret: &[u8], candidate: &str) -> bool {
    match sign_fields(fields, secret) {
        Ok(expected) => constant_time_eq(candidate, &expected),
        Err(SigningError::EmptySecret) => false,
    }
}

// ---------------------------------------------------------------------------
// Raw-body signatures (gateway webhooks)
// ---------------------------------------------------------------------------

/// Compute an HMAC-SHA512 hex signature over a raw request body.
pub fn sign_raw_body(body: &[u8], secret: &[u8]) -> Result<String, SigningError> {
    if secret.is_empty() {
        return Err(SigningError::EmptySecret);
    }
    let mut mac = HmacSha512::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify an HMAC-SHA512 signature over a raw request body.
pub fn verify_raw_body(body: &[u8], secret: &[u8], candidate: &str) -> bool {
    match sign_raw_body(body, secret) {
        Ok(expected) => constant_time_eq(candidate, &expected),
        Err(SigningError::EmptySecret) => false,
    }
}

// ---------------------------------------------------------------------------
// Constant-time comparison
// ---------------------------------------------------------------------------

/// Compare two strings without early exit on the first differing byte.
///
/// A length mismatch returns immediately; the length of a hex digest is
/// public information, the bytes are not.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ---------------------------------------------------------------------------
// hex encoding helper (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
