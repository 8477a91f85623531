//! Server-to-server Paystack API client.

use std::time::Duration;

use crate::types::VerifyEnvelope;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Upper bound on any single gateway call so a slow dependency cannot hang
/// a checkout request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Connection, TLS, timeout, or response-decoding failure.
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Paystack REST client holding the secret key.
pub struct PaystackClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_base_url(secret_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different base URL (tests, sandboxes).
    pub fn with_base_url(secret_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("static client options are valid");
        Self {
            http,
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Ask the gateway whether `reference` actually settled.
    ///
    /// Only the returned envelope is trusted; the caller must check
    /// `data.status == "success"`, never the client's own claim.
    pub async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyEnvelope, GatewayError> {
        let url = format!("{}/transaction/verify/{reference}", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let http_status = response.status();
        let envelope = response.json::<VerifyEnvelope>().await?;

        tracing::debug!(
            reference,
            %http_status,
            api_status = envelope.status,
            "Gateway verification response",
        );

        Ok(envelope)
    }
}
