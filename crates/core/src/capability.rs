//! Signed, time-limited download capabilities.
//!
//! A capability is a URL query carrying `(email, product, expires, sig)`
//! where `sig = HMAC-SHA256(secret, email:product:expires)`. It is never
//! persisted: holders are authorized purely by the signature and the expiry
//! embedded in the link. Expiry is the only termination path.

use chrono::{DateTime, Duration, Utc};

use crate::catalog::Product;
use crate::signing::{self, SigningError};

/// Default validity window for freshly issued download links.
pub const DEFAULT_VALIDITY_HOURS: i64 = 24;

/// Rejection categories for inbound download requests.
///
/// Each maps to a distinct HTTP status; none reveals anything beyond its
/// category, so a failed guess learns only which check tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// One or more of email/product/expires/sig is absent or empty.
    #[error("missing required download parameters")]
    MissingParameters,

    /// The link is past its expiry, or the expiry field is not an integer.
    #[error("download link has expired")]
    Expired,

    /// The signature does not match the received fields.
    #[error("invalid download link")]
    InvalidSignature,

    /// The signed product key is outside the catalog.
    #[error("invalid product")]
    InvalidProduct,
}

// ---------------------------------------------------------------------------
// Issuing
// ---------------------------------------------------------------------------

/// Mint a signed download URL for a verified purchase.
///
/// Pure function of its inputs, the clock, and the signing secret: no side
/// effects, nothing stored. Returns a site-relative URL such as
/// `/download?email=…&product=book&expires=1700000000000&sig=…`.
pub fn issue_download_url(
    email: &str,
    product: Product,
    validity: Duration,
    now: DateTime<Utc>,
    secret: &[u8],
) -> Result<String, SigningError> {
    let expires = (now + validity).timestamp_millis().to_string();
    let sig = signing::sign_fields(&[email, product.as_str(), &expires], secret)?;

    let query = serde_urlencoded::to_string([
        ("email", email),
        ("product", product.as_str()),
        ("expires", expires.as_str()),
        ("sig", sig.as_str()),
    ])
    .expect("urlencoding plain string pairs cannot fail");

    Ok(format!("/download?{query}"))
}

/// The default validity window as a [`Duration`].
pub fn default_validity() -> Duration {
    Duration::hours(DEFAULT_VALIDITY_HOURS)
}

// ---------------------------------------------------------------------------
// Verifying
// ---------------------------------------------------------------------------

/// The four capability fields, as received. All optional so the presence
/// check is part of verification rather than the deserializer.
#[derive(Debug, Default, Clone)]
pub struct DownloadParams {
    pub email: Option<String>,
    pub product: Option<String>,
    pub expires: Option<String>,
    pub sig: Option<String>,
}

/// Validate an inbound download request, short-circuiting on first failure.
///
/// Check order: presence, expiry, signature, product membership. The
/// signature covers the raw strings exactly as received, so no
/// canonicalization happens before the compare. On success returns the
/// authorized `(email, product)` pair.
pub fn verify_download_request(
    params: &DownloadParams,
    now_ms: i64,
    secret: &[u8],
) -> Result<(String, Product), CapabilityError> {
    let (email, product, expires, sig) = match (
        params.email.as_deref(),
        params.product.as_deref(),
        params.expires.as_deref(),
        params.sig.as_deref(),
    ) {
        (Some(e), Some(p), Some(x), Some(s))
            if !e.is_empty() && !p.is_empty() && !x.is_empty() && !s.is_empty() =>
        {
            (e, p, x, s)
        }
        _ => return Err(CapabilityError::MissingParameters),
    };

    // A non-integer expiry is treated the same as a lapsed one.
    let expires_ms: i64 = expires.parse().map_err(|_| CapabilityError::Expired)?;
    if now_ms > expires_ms {
        return Err(CapabilityError::Expired);
    }

    if !signing::verify_fields(&[email, product, expires], secret, sig) {
        return Err(CapabilityError::InvalidSignature);
    }

    let product = Product::parse(product).ok_or(CapabilityError::InvalidProduct)?;

    Ok((email.to_string(), product))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"capability-test-secret";

    /// Decompose an issued URL back into [`DownloadParams`].
    fn params_from_url(url: &str) -> DownloadParams {
        let query = url.strip_prefix("/download?").expect("issued URL prefix");
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).expect("issued URL parses");
        let mut params = DownloadParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "email" => params.email = Some(value),
                "product" => params.product = Some(value),
                "expires" => params.expires = Some(value),
                "sig" => params.sig = Some(value),
                other => panic!("unexpected query key {other}"),
            }
        }
        params
    }

    fn issue_at(now: DateTime<Utc>) -> DownloadParams {
        let url = issue_download_url(
            "buyer@example.com",
            Product::Book,
            default_validity(),
            now,
            SECRET,
        )
        .unwrap();
        params_from_url(&url)
    }

    #[test]
    fn issued_url_verifies_with_same_secret() {
        let now = Utc::now();
        let params = issue_at(now);
        let (email, product) =
            verify_download_request(&params, now.timestamp_millis(), SECRET).unwrap();
        assert_eq!(email, "buyer@example.com");
        assert_eq!(product, Product::Book);
    }

    #[test]
    fn issued_url_fails_under_other_secret() {
        let now = Utc::now();
        let params = issue_at(now);
        assert_eq!(
            verify_download_request(&params, now.timestamp_millis(), b"different-secret"),
            Err(CapabilityError::InvalidSignature)
        );
    }

    #[test]
    fn email_with_plus_sign_survives_the_round_trip() {
        let now = Utc::now();
        let url = issue_download_url(
            "buyer+tag@example.com",
            Product::Bundle,
            default_validity(),
            now,
            SECRET,
        )
        .unwrap();
        let params = params_from_url(&url);
        let (email, product) =
            verify_download_request(&params, now.timestamp_millis(), SECRET).unwrap();
        assert_eq!(email, "buyer+tag@example.com");
        assert_eq!(product, Product::Bundle);
    }

    #[test]
    fn missing_any_field_is_missing_parameters() {
        let now = Utc::now();
        let full = issue_at(now);

        for strip in 0..4 {
            let mut params = full.clone();
            match strip {
                0 => params.email = None,
                1 => params.product = None,
                2 => params.expires = None,
                _ => params.sig = None,
            }
            assert_eq!(
                verify_download_request(&params, now.timestamp_millis(), SECRET),
                Err(CapabilityError::MissingParameters)
            );
        }
    }

    #[test]
    fn empty_field_counts_as_missing() {
        let now = Utc::now();
        let mut params = issue_at(now);
        params.sig = Some(String::new());
        assert_eq!(
            verify_download_request(&params, now.timestamp_millis(), SECRET),
            Err(CapabilityError::MissingParameters)
        );
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let params = issue_at(now);
        let expires_ms: i64 = params.expires.as_deref().unwrap().parse().unwrap();

        // One millisecond before expiry still verifies…
        assert!(verify_download_request(&params, expires_ms - 1, SECRET).is_ok());
        // …at the boundary still verifies…
        assert!(verify_download_request(&params, expires_ms, SECRET).is_ok());
        // …one millisecond past fails with Expired, not InvalidSignature.
        assert_eq!(
            verify_download_request(&params, expires_ms + 1, SECRET),
            Err(CapabilityError::Expired)
        );
    }

    #[test]
    fn malformed_expiry_is_expired() {
        let now = Utc::now();
        let mut params = issue_at(now);
        params.expires = Some("not-a-number".into());
        assert_eq!(
            verify_download_request(&params, now.timestamp_millis(), SECRET),
            Err(CapabilityError::Expired)
        );
    }

    #[test]
    fn tampered_signature_fails() {
        let now = Utc::now();
        let mut params = issue_at(now);
        let sig = params.sig.take().unwrap();
        let flipped = if sig.ends_with('0') {
            format!("{}1", &sig[..sig.len() - 1])
        } else {
            format!("{}0", &sig[..sig.len() - 1])
        };
        params.sig = Some(flipped);
        assert_eq!(
            verify_download_request(&params, now.timestamp_millis(), SECRET),
            Err(CapabilityError::InvalidSignature)
        );
    }

    #[test]
    fn tampered_email_fails_signature_check() {
        let now = Utc::now();
        let mut params = issue_at(now);
        params.email = Some("attacker@example.com".into());
        assert_eq!(
            verify_download_request(&params, now.timestamp_millis(), SECRET),
            Err(CapabilityError::InvalidSignature)
        );
    }

    #[test]
    fn signed_but_unknown_product_is_invalid_product() {
        // A correctly signed tuple whose product is outside the catalog must
        // fail on membership, after the signature check.
        let now = Utc::now();
        let expires = (now + default_validity()).timestamp_millis().to_string();
        let sig = signing::sign_fields(&["buyer@example.com", "poster", &expires], SECRET).unwrap();
        let params = DownloadParams {
            email: Some("buyer@example.com".into()),
            product: Some("poster".into()),
            expires: Some(expires),
            sig: Some(sig),
        };
        assert_eq!(
            verify_download_request(&params, now.timestamp_millis(), SECRET),
            Err(CapabilityError::InvalidProduct)
        );
    }

    #[test]
    fn verification_is_repeatable() {
        // The same still-valid link can be checked any number of times.
        let now = Utc::now();
        let params = issue_at(now);
        for _ in 0..3 {
            assert!(verify_download_request(&params, now.timestamp_millis(), SECRET).is_ok());
        }
    }
}
