//! Route definitions for gateway webhooks.
//!
//! ```text
//! POST /webhook/paystack -> paystack_webhook
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/webhook/paystack", post(webhooks::paystack_webhook))
}
