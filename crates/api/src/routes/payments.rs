//! Route definitions for payment verification.
//!
//! ```text
//! POST /verify-payment -> verify_payment
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/verify-payment", post(payments::verify_payment))
}
