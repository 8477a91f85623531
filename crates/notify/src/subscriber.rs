//! Newsletter subscriber store (Brevo contacts API).
//!
//! The store exposes one operation: upsert a contact by email. Brevo
//! deduplicates by email when `updateEnabled` is set; the explicit update
//! fallback covers accounts where that flag still returns a duplicate error.

use std::time::Duration;

use folio_core::contact;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.brevo.com/v3";

/// Upper bound on any single provider call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for subscriber-store failures.
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    /// Connection, TLS, timeout, or response-decoding failure.
    #[error("subscriber store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider rejected the contact data.
    #[error("subscriber store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the subscriber store.
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Provider API key.
    pub api_key: String,
    /// Lists new contacts are added to. May be empty.
    pub list_ids: Vec<i64>,
}

impl SubscriberConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `BREVO_API_KEY` is not set. List ids come from
    /// `BREVO_LIST_IDS` (comma-separated) or the singular `BREVO_LIST_ID`;
    /// a contact created without lists is still stored by the provider.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BREVO_API_KEY").ok()?;
        let raw_ids = std::env::var("BREVO_LIST_IDS")
            .or_else(|_| std::env::var("BREVO_LIST_ID"))
            .unwrap_or_default();
        Some(Self {
            api_key,
            list_ids: parse_list_ids(&raw_ids),
        })
    }
}

/// Parse a comma-separated list-id string, skipping anything non-numeric.
fn parse_list_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A subscriber to upsert.
#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Client for the provider's contacts API.
pub struct SubscriberStore {
    http: reqwest::Client,
    base_url: String,
    config: SubscriberConfig,
}

impl SubscriberStore {
    pub fn new(config: SubscriberConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Point the store at a different base URL (tests, sandboxes).
    pub fn with_base_url(config: SubscriberConfig, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("static client options are valid");
        Self {
            http,
            base_url: base_url.into(),
            config,
        }
    }

    /// Create or update a contact. The provider deduplicates by email.
    pub async fn upsert(&self, subscriber: &NewSubscriber) -> Result<(), SubscriberError> {
        let email = contact::normalize_email(&subscriber.email);
        let payload = self.contact_payload(&email, subscriber, true);

        let response = self
            .http
            .post(format!("{}/contacts", self.base_url))
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            tracing::info!(email = %email, "Subscriber upserted");
            return Ok(());
        }

        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let code = body["code"].as_str().unwrap_or_default();

        // updateEnabled should make creation idempotent, but some accounts
        // still answer with a duplicate error; fall back to an explicit update.
        if code == "duplicate_parameter" || code == "duplicate_unique_field" {
            return self.update_existing(&email, subscriber).await;
        }

        Err(SubscriberError::Rejected {
            status,
            message: body["message"]
                .as_str()
                .unwrap_or("unknown provider error")
                .to_string(),
        })
    }

    async fn update_existing(
        &self,
        email: &str,
        subscriber: &NewSubscriber,
    ) -> Result<(), SubscriberError> {
        let payload = self.contact_payload(email, subscriber, false);

        let response = self
            .http
            .put(format!("{}/contacts/{email}", self.base_url))
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            tracing::info!(email = %email, "Existing subscriber updated");
            return Ok(());
        }

        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        Err(SubscriberError::Rejected {
            status,
            message: body["message"]
                .as_str()
                .unwrap_or("unknown provider error")
                .to_string(),
        })
    }

    /// Build the provider payload. Attribute names follow the provider's
    /// convention (FNAME/LNAME/SMS, uppercase).
    fn contact_payload(
        &self,
        email: &str,
        subscriber: &NewSubscriber,
        create: bool,
    ) -> serde_json::Value {
        let mut attributes = serde_json::Map::new();
        if let Some(name) = subscriber.name.as_deref() {
            let (first, rest) = contact::split_name(name);
            if !first.is_empty() {
                attributes.insert("FNAME".into(), first.into());
            }
            if let Some(last) = rest {
                attributes.insert("LNAME".into(), last.into());
            }
        }
        if let Some(phone) = subscriber.phone.as_deref().and_then(contact::normalize_phone) {
            attributes.insert("SMS".into(), phone.into());
        }

        let mut payload = serde_json::Map::new();
        if create {
            payload.insert("email".into(), email.into());
            payload.insert("updateEnabled".into(), true.into());
        }
        if !attributes.is_empty() {
            payload.insert("attributes".into(), attributes.into());
        }
        if !self.config.list_ids.is_empty() {
            payload.insert("listIds".into(), self.config.list_ids.clone().into());
        }
        serde_json::Value::Object(payload)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_id_parsing_skips_garbage() {
        assert_eq!(parse_list_ids("1,2,3"), vec![1, 2, 3]);
        assert_eq!(parse_list_ids(" 7 "), vec![7]);
        assert_eq!(parse_list_ids("7,abc,9"), vec![7, 9]);
        assert!(parse_list_ids("").is_empty());
    }

    #[test]
    fn payload_carries_split_name_and_normalized_phone() {
        let store = SubscriberStore::new(SubscriberConfig {
            api_key: "test-key".into(),
            list_ids: vec![4],
        });
        let subscriber = NewSubscriber {
            email: "Reader@Example.com".into(),
            name: Some("Ama Serwaa Mensah".into()),
            phone: Some("0241234567".into()),
        };

        let payload = store.contact_payload("reader@example.com", &subscriber, true);
        assert_eq!(payload["email"], "reader@example.com");
        assert_eq!(payload["updateEnabled"], true);
        assert_eq!(payload["attributes"]["FNAME"], "Ama");
        assert_eq!(payload["attributes"]["LNAME"], "Serwaa Mensah");
        assert_eq!(payload["attributes"]["SMS"], "+233241234567");
        assert_eq!(payload["listIds"][0], 4);
    }

    #[test]
    fn update_payload_omits_email_and_flag() {
        let store = SubscriberStore::new(SubscriberConfig {
            api_key: "test-key".into(),
            list_ids: vec![],
        });
        let subscriber = NewSubscriber {
            email: "reader@example.com".into(),
            name: None,
            phone: None,
        };

        let payload = store.contact_payload("reader@example.com", &subscriber, false);
        assert!(payload.get("email").is_none());
        assert!(payload.get("updateEnabled").is_none());
        assert!(payload.get("listIds").is_none());
    }
}
