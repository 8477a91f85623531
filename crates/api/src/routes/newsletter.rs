//! Route definitions for newsletter subscription.
//!
//! ```text
//! POST /subscribe -> subscribe
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::newsletter;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/subscribe", post(newsletter::subscribe))
}
