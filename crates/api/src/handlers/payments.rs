//! Handler for synchronous payment verification.
//!
//! The browser widget reports a transaction reference after checkout; this
//! endpoint asks the gateway whether that reference actually settled and,
//! only then, mints a download capability. The client's own claim of
//! success authorizes nothing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use folio_core::capability;
use folio_core::purchase::{classify_book_type, BookType};
use folio_db::models::purchase::NewPurchase;
use folio_db::repositories::PurchaseRepo;
use folio_gateway::CheckoutDetails;
use folio_notify::messages::{admin_purchase_notification, purchase_confirmation};
use folio_notify::PurchaseMail;

use crate::state::AppState;

/// Source tag for purchases recorded by this path.
const SOURCE_VERIFY: &str = "verify";

/// Currency assumed when the gateway omits one.
const DEFAULT_CURRENCY: &str = "GHS";

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub reference: Option<String>,
    /// Client-supplied contact details; display only, never the capability
    /// identity.
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub book_type: Option<String>,
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(default)]
    pub include_bundle: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl DeliveryAddress {
    /// Flatten to a single storable line, skipping empty parts.
    fn to_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.street.as_deref(),
            self.city.as_deref(),
            self.region.as_deref(),
            self.postal_code.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Response shape the payment widget expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

fn declined(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(VerifyPaymentResponse {
            success: false,
            message: message.into(),
            download_url: None,
            email_sent: None,
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// POST /verify-payment
// ---------------------------------------------------------------------------

/// Verify a client-asserted payment reference with the gateway and, on
/// confirmed success, record the purchase and mint a download capability.
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Response {
    let Some(reference) = req
        .reference
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    else {
        return declined(StatusCode::BAD_REQUEST, "Payment reference is required");
    };

    let Some(gateway) = state.gateway.clone() else {
        if state.config.dev_mode {
            return simulated_dev_response(&state, &req);
        }
        tracing::error!("Payment gateway secret not configured");
        return declined(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Payment system configuration error",
        );
    };

    // Server-to-server verification. Gateway transport failures decline the
    // purchase: without a confirmed status there is nothing to fulfil.
    let envelope = match gateway.verify_transaction(reference).await {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::error!(reference, error = %err, "Gateway verification call failed");
            return declined(StatusCode::BAD_REQUEST, "Payment verification failed");
        }
    };

    let data = match envelope.data {
        Some(data) if envelope.status && data.is_success() => data,
        _ => {
            tracing::warn!(
                reference,
                gateway_message = %envelope.message,
                "Gateway did not confirm the charge",
            );
            return declined(StatusCode::BAD_REQUEST, "Payment verification failed");
        }
    };

    // Checkout metadata is parsed once; the client body only fills gaps in
    // display fields.
    let details = CheckoutDetails::from_metadata(data.metadata.as_ref());
    let label = details.product_label.as_deref().or(req.book_type.as_deref());
    let book_type = classify_book_type(label, req.include_bundle);

    // The capability identity comes from the gateway's customer record,
    // never from the client body.
    let buyer_email = data.customer.email.clone();

    let download_url = issue_capability(&state, &buyer_email, book_type);

    let delivery_address = details
        .delivery_address
        .clone()
        .or_else(|| req.delivery_address.as_ref().and_then(DeliveryAddress::to_line));

    let purchase = NewPurchase {
        reference: data.reference.clone(),
        email: buyer_email.clone(),
        book_type: book_type.as_str().to_string(),
        amount_minor: data.amount,
        currency: data
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        customer_name: details.customer_name.clone().or(req.name),
        phone: details.phone.clone().or(req.phone),
        delivery_address,
        source: SOURCE_VERIFY.to_string(),
    };

    let newly_recorded = match PurchaseRepo::insert_if_absent(&state.pool, &purchase).await {
        Ok(Some(row)) => {
            tracing::info!(
                purchase_id = row.id,
                reference = %row.reference,
                email = %row.email,
                book_type = %row.book_type,
                amount_minor = row.amount_minor,
                "Payment verified and purchase recorded",
            );
            true
        }
        Ok(None) => {
            tracing::info!(
                reference,
                "Purchase already recorded, skipping duplicate notifications",
            );
            false
        }
        Err(err) => {
            // The recorder must not block fulfilment; notify anyway.
            tracing::error!(error = %err, reference, "Failed to record purchase");
            true
        }
    };

    let email_sent = if newly_recorded {
        let mail = PurchaseMail {
            reference: purchase.reference,
            email: purchase.email,
            book_type,
            amount_minor: purchase.amount_minor,
            currency: purchase.currency,
            customer_name: purchase.customer_name,
            phone: purchase.phone,
            delivery_address: purchase.delivery_address,
            download_url: download_url.clone(),
        };
        send_purchase_emails(&state, &mail).await
    } else {
        false
    };

    let message = if email_sent {
        "Payment verified successfully. A confirmation email is on its way.".to_string()
    } else {
        "Payment verified successfully. Confirmation email delivery could not be confirmed."
            .to_string()
    };

    Json(VerifyPaymentResponse {
        success: true,
        message,
        download_url,
        email_sent: Some(email_sent),
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// Helpers (shared with the webhook backstop)
// ---------------------------------------------------------------------------

/// Mint a download capability for digital purchases. Hardcopy purchases are
/// fulfilled by shipping and get no URL.
pub(crate) fn issue_capability(
    state: &AppState,
    buyer_email: &str,
    book_type: BookType,
) -> Option<String> {
    let product = book_type.download_product()?;
    match capability::issue_download_url(
        buyer_email,
        product,
        Duration::hours(state.config.download_validity_hours),
        Utc::now(),
        state.config.download_secret.as_bytes(),
    ) {
        Ok(url) => Some(url),
        Err(err) => {
            // Unreachable in practice: startup refuses an empty secret.
            tracing::error!(error = %err, "Could not sign download URL");
            None
        }
    }
}

/// Send buyer confirmation and admin notifications. Best effort: failures
/// are logged and reported back as `false`, never as request errors.
pub(crate) async fn send_purchase_emails(state: &AppState, mail: &PurchaseMail) -> bool {
    let Some(mailer) = state.mailer.as_ref() else {
        tracing::warn!(
            reference = %mail.reference,
            "Mailer not configured, skipping purchase emails",
        );
        return false;
    };

    let (subject, body) = purchase_confirmation(mail);
    let buyer_ok = match mailer.send(&mail.email, &subject, body).await {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(
                error = %err,
                to = %mail.email,
                reference = %mail.reference,
                "Failed to send purchase confirmation",
            );
            false
        }
    };

    for admin in &state.config.admin_emails {
        let (subject, body) = admin_purchase_notification(mail);
        if let Err(err) = mailer.send(admin, &subject, body).await {
            tracing::error!(error = %err, to = %admin, "Failed to send admin notification");
        }
    }

    buyer_ok
}

/// Simulated approval for local development without gateway credentials.
/// Only reachable when `APP_ENV=development`.
fn simulated_dev_response(state: &AppState, req: &VerifyPaymentRequest) -> Response {
    let Some(email) = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return declined(StatusCode::BAD_REQUEST, "Buyer email is required");
    };

    let book_type = classify_book_type(req.book_type.as_deref(), req.include_bundle);
    let download_url = issue_capability(state, email, book_type);

    tracing::warn!(email, "DEV MODE: payment verification skipped");

    Json(VerifyPaymentResponse {
        success: true,
        message: "DEV MODE: Payment simulated".to_string(),
        download_url,
        email_sent: Some(false),
    })
    .into_response()
}
