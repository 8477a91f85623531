//! Webhook signature verification.
//!
//! Paystack signs every webhook delivery with HMAC-SHA512 over the raw
//! request body and sends the hex digest in `x-paystack-signature`. The
//! check runs against the exact received bytes, never a re-serialized form.

use folio_core::signing;

/// Header carrying the gateway's signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Verify a webhook delivery against the configured gateway secret.
pub fn verify_webhook_signature(raw_body: &[u8], signature: &str, secret: &str) -> bool {
    signing::verify_raw_body(raw_body, secret.as_bytes(), signature)
}
