//! Route definitions for analytics.
//!
//! ```text
//! POST /analytics -> track_event
//! GET  /analytics -> summary (operator key when configured)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/analytics",
        get(analytics::summary).post(analytics::track_event),
    )
}
