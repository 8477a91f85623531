//! Handler for newsletter subscription.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use folio_core::analytics::actions;
use folio_core::contact;
use folio_db::models::analytics_event::NewAnalyticsEvent;
use folio_db::repositories::AnalyticsRepo;
use folio_notify::{NewSubscriber, SubscriberError};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Response shape the signup form expects.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

fn reply(status: StatusCode, success: bool, message: impl Into<String>) -> Response {
    (
        status,
        Json(SubscribeResponse {
            success,
            message: message.into(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// POST /subscribe
// ---------------------------------------------------------------------------

/// Upsert a newsletter subscriber.
///
/// Validation happens before any provider call: a bad email or missing name
/// never reaches the subscriber store.
pub async fn subscribe(State(state): State<AppState>, Json(req): Json<SubscribeRequest>) -> Response {
    let email = contact::normalize_email(req.email.as_deref().unwrap_or_default());
    if !contact::is_valid_email(&email) {
        return reply(StatusCode::BAD_REQUEST, false, "Valid email is required");
    }

    let Some(name) = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
    else {
        return reply(StatusCode::BAD_REQUEST, false, "Name is required");
    };

    let Some(store) = state.subscribers.as_ref() else {
        tracing::error!("Subscriber store not configured");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            false,
            "Email service is not configured. Please contact support.",
        );
    };

    let subscriber = NewSubscriber {
        email: email.clone(),
        name: Some(name),
        phone: req.phone,
    };

    match store.upsert(&subscriber).await {
        Ok(()) => {
            record_signup_event(&state).await;
            reply(
                StatusCode::OK,
                true,
                "Thank you! You have been subscribed successfully.",
            )
        }
        Err(SubscriberError::Rejected { status: 400, message }) => {
            tracing::warn!(email = %email, provider_message = %message, "Provider rejected contact data");
            reply(
                StatusCode::BAD_REQUEST,
                false,
                "Invalid contact data. Please check your information.",
            )
        }
        Err(err) => {
            tracing::error!(error = %err, email = %email, "Subscriber upsert failed");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                false,
                "Subscription failed. Please try again later.",
            )
        }
    }
}

/// Count the signup in the analytics funnel, best-effort.
async fn record_signup_event(state: &AppState) {
    let event = NewAnalyticsEvent {
        action: actions::NEWSLETTER_SIGNUP.to_string(),
        category: "newsletter".to_string(),
        label: None,
        value: None,
        metadata: serde_json::json!({}),
        user_agent: None,
        ip_address: None,
        referer: None,
    };
    if let Err(err) = AnalyticsRepo::record_event(&state.pool, &event).await {
        tracing::error!(error = %err, "Failed to record newsletter signup event");
    }
}
