//! Wire types for the Paystack verify endpoint and webhook events.

use serde::Deserialize;

/// Transaction status value the gateway reports for a settled charge.
pub const STATUS_SUCCESS: &str = "success";

/// Webhook event names this service dispatches on.
pub mod events {
    pub const CHARGE_SUCCESS: &str = "charge.success";
    pub const CHARGE_FAILED: &str = "charge.failed";
    /// All refund events (`refund.processed`, `refund.failed`, …) share the
    /// prefix; they are acknowledged as a group.
    pub const REFUND_PREFIX: &str = "refund.";
}

// ---------------------------------------------------------------------------
// Verify endpoint
// ---------------------------------------------------------------------------

/// Envelope returned by `GET /transaction/verify/{reference}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEnvelope {
    /// Whether the API call itself succeeded (not the charge).
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<VerifyData>,
}

/// Transaction details inside a verify envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyData {
    /// Charge status: `"success"`, `"failed"`, `"abandoned"`, ….
    pub status: String,
    pub reference: String,
    /// Amount in minor units (pesewas).
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    pub customer: Customer,
    #[serde(default)]
    pub metadata: Option<CheckoutMetadata>,
}

impl VerifyData {
    /// Whether the gateway reports this charge as settled.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// The gateway's authoritative customer record.
///
/// `email` here is the identity embedded in download capabilities;
/// client-supplied addresses are only ever used for display.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Free-form checkout metadata attached by the payment widget.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutMetadata {
    #[serde(default)]
    pub custom_fields: Option<Vec<CustomField>>,
}

/// One entry of the widget's `custom_fields` array. Values arrive as either
/// strings or numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomField {
    #[serde(default)]
    pub display_name: Option<String>,
    pub variable_name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Webhook events
// ---------------------------------------------------------------------------

/// A pushed gateway event, parsed after the raw-body signature check.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEvent {
    pub event: String,
    pub data: ChargeData,
}

/// Charge details carried by webhook events.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeData {
    pub reference: String,
    #[serde(default)]
    pub status: Option<String>,
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    pub customer: Customer,
    #[serde(default)]
    pub metadata: Option<CheckoutMetadata>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
