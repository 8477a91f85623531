pub mod analytics;
pub mod downloads;
pub mod health;
pub mod newsletter;
pub mod payments;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the public route tree.
///
/// Paths are externally fixed: the gateway dashboard points at the webhook
/// URL and signed download links live in buyers' inboxes, so nothing here
/// is nested under a version prefix.
///
/// ```text
/// GET  /download            signed book download
/// GET  /download-research   free research paper download
/// POST /verify-payment      synchronous gateway verification
/// POST /webhook/paystack    pushed gateway events (HMAC authenticated)
/// POST /subscribe           newsletter subscriber upsert
/// POST /analytics           record an analytics event
/// GET  /analytics           operator aggregate (key protected)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(downloads::router())
        .merge(payments::router())
        .merge(webhooks::router())
        .merge(newsletter::router())
        .merge(analytics::router())
}
