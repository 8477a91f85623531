//! Handler for pushed gateway events.
//!
//! The webhook is a reliability backstop for the synchronous verification
//! path: the same transaction usually arrives on both. Authentication is an
//! HMAC over the raw body, checked before anything is parsed. Once a
//! delivery is authenticated it is always acknowledged with 200 — the
//! gateway retries on anything else, and a processing bug must not turn
//! into a retry storm.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::json;

use folio_core::purchase::classify_book_type;
use folio_db::models::purchase::NewPurchase;
use folio_db::repositories::PurchaseRepo;
use folio_gateway::signature::{verify_webhook_signature, SIGNATURE_HEADER};
use folio_gateway::types::events;
use folio_gateway::{ChargeData, CheckoutDetails, GatewayEvent};
use folio_notify::PurchaseMail;

use crate::handlers::payments::{issue_capability, send_purchase_emails};
use crate::state::AppState;

/// Source tag for purchases recorded by this path.
const SOURCE_WEBHOOK: &str = "webhook";

/// Currency assumed when the gateway omits one.
const DEFAULT_CURRENCY: &str = "GHS";

// ---------------------------------------------------------------------------
// POST /webhook/paystack
// ---------------------------------------------------------------------------

/// Receive a pushed gateway event.
///
/// State machine per delivery: received → signature checked → accepted or
/// rejected. Rejection is the only non-200 outcome; accepted deliveries are
/// acknowledged even when processing fails internally.
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(secret) = state.config.paystack_secret_key.as_deref() else {
        tracing::error!("Gateway secret not configured; cannot authenticate webhook");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Server configuration error" })),
        )
            .into_response();
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let authentic = signature
        .map(|sig| verify_webhook_signature(&body, sig, secret))
        .unwrap_or(false);

    if !authentic {
        tracing::warn!(
            has_signature = signature.is_some(),
            "Webhook rejected: missing or invalid signature",
        );
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid signature" })),
        )
            .into_response();
    }

    // Authenticated from here on: always acknowledge, log any trouble.
    match serde_json::from_slice::<GatewayEvent>(&body) {
        Ok(event) => dispatch_event(&state, event).await,
        Err(err) => {
            tracing::error!(error = %err, "Webhook body did not parse; acknowledging anyway");
        }
    }

    Json(json!({ "received": true })).into_response()
}

// ---------------------------------------------------------------------------
// Event dispatch
// ---------------------------------------------------------------------------

async fn dispatch_event(state: &AppState, event: GatewayEvent) {
    match event.event.as_str() {
        events::CHARGE_SUCCESS => handle_charge_success(state, event.data).await,
        events::CHARGE_FAILED => {
            tracing::info!(
                reference = %event.data.reference,
                email = %event.data.customer.email,
                "Gateway reported a failed charge",
            );
        }
        refund if refund.starts_with(events::REFUND_PREFIX) => {
            tracing::info!(
                event = %refund,
                reference = %event.data.reference,
                "Refund event acknowledged",
            );
        }
        other => {
            tracing::info!(event = %other, "Unhandled webhook event acknowledged");
        }
    }
}

/// Record a webhook-confirmed charge if the synchronous path has not
/// already done so. Buyer-facing email from this path is opt-in and off by
/// default; the purchase row is the only unconditional side effect.
async fn handle_charge_success(state: &AppState, data: ChargeData) {
    let details = CheckoutDetails::from_metadata(data.metadata.as_ref());
    let book_type = classify_book_type(details.product_label.as_deref(), false);

    let customer_name = details.customer_name.clone().or_else(|| {
        let full = [
            data.customer.first_name.as_deref(),
            data.customer.last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
        (!full.is_empty()).then_some(full)
    });

    let purchase = NewPurchase {
        reference: data.reference.clone(),
        email: data.customer.email.clone(),
        book_type: book_type.as_str().to_string(),
        amount_minor: data.amount,
        currency: data
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        customer_name,
        phone: details.phone.clone(),
        delivery_address: details.delivery_address.clone(),
        source: SOURCE_WEBHOOK.to_string(),
    };

    let inserted = PurchaseRepo::insert_if_absent(&state.pool, &purchase).await;
    match inserted {
        Ok(Some(row)) => {
            tracing::info!(
                purchase_id = row.id,
                reference = %row.reference,
                email = %row.email,
                book_type = %row.book_type,
                "Purchase recorded via webhook backstop",
            );

            if state.config.webhook_notifications {
                let download_url = issue_capability(state, &purchase.email, book_type);
                let mail = PurchaseMail {
                    reference: purchase.reference,
                    email: purchase.email,
                    book_type,
                    amount_minor: purchase.amount_minor,
                    currency: purchase.currency,
                    customer_name: purchase.customer_name,
                    phone: purchase.phone,
                    delivery_address: purchase.delivery_address,
                    download_url,
                };
                send_purchase_emails(state, &mail).await;
            }
        }
        Ok(None) => {
            tracing::debug!(
                reference = %purchase.reference,
                "Purchase already recorded by the synchronous path",
            );
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                reference = %purchase.reference,
                "Failed to record webhook purchase",
            );
        }
    }
}
