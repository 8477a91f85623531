//! Analytics event entity models.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `analytics_events` table.
///
/// Write-only for request handling: nothing in the request path ever reads
/// these back for an authorization decision.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnalyticsEvent {
    pub id: DbId,
    pub action: String,
    pub category: String,
    pub label: Option<String>,
    pub value: Option<i64>,
    pub metadata: serde_json::Value,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
    pub created_at: Timestamp,
}

/// Input for recording an analytics event.
#[derive(Debug, Clone)]
pub struct NewAnalyticsEvent {
    pub action: String,
    pub category: String,
    pub label: Option<String>,
    pub value: Option<i64>,
    pub metadata: serde_json::Value,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}
