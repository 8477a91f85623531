//! Route definitions for the download endpoints.
//!
//! ```text
//! GET /download            -> fetch_book (signed capability required)
//! GET /download-research   -> fetch_research (free, catalog gated)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::downloads;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/download", get(downloads::fetch_book))
        .route("/download-research", get(downloads::fetch_research))
}
