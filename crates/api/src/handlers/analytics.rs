//! Handlers for analytics event recording and the operator aggregate.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use folio_core::analytics::{self, actions};
use folio_core::purchase::BookType;
use folio_core::signing;
use folio_db::models::analytics_event::NewAnalyticsEvent;
use folio_db::repositories::{AnalyticsRepo, DownloadRepo, PurchaseRepo};

use crate::error::{AppError, AppResult};
use crate::request_meta::request_meta;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TrackEventRequest {
    pub action: Option<String>,
    pub category: Option<String>,
    pub label: Option<String>,
    pub value: Option<i64>,
    pub metadata: Option<serde_json::Value>,
}

/// Record a client-side event server-side.
///
/// The event store is write-only for the request path: a recorder failure
/// is logged and the request still succeeds.
pub async fn track_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TrackEventRequest>,
) -> AppResult<impl IntoResponse> {
    let action = req.action.as_deref().map(str::trim).unwrap_or_default();
    let category = req.category.as_deref().map(str::trim).unwrap_or_default();
    if action.is_empty() || category.is_empty() {
        return Err(AppError::BadRequest(
            "Action and category are required".to_string(),
        ));
    }

    let meta = request_meta(&headers);
    let event = NewAnalyticsEvent {
        action: action.to_string(),
        category: category.to_string(),
        label: req.label,
        value: req.value,
        metadata: req.metadata.unwrap_or_else(|| json!({})),
        user_agent: meta.user_agent,
        ip_address: meta.ip_address,
        referer: meta.referer,
    };

    match AnalyticsRepo::record_event(&state.pool, &event).await {
        Ok(row) => tracing::debug!(event_id = row.id, action = %row.action, "Analytics event recorded"),
        Err(err) => tracing::error!(error = %err, action = %event.action, "Failed to record analytics event"),
    }

    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// GET /analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub key: Option<String>,
    /// `YYYY-MM-DD` for a single day, `total` (or absent) for everything.
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsSummary {
    page_views: PageViewSummary,
    downloads: DownloadSummary,
    purchases: PurchaseSummary,
    events: FunnelEvents,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageViewSummary {
    total: i64,
    by_page: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DownloadSummary {
    total: i64,
    by_product: BTreeMap<String, i64>,
    by_product_summary: ProductSummary,
}

#[derive(Debug, Serialize)]
struct ProductSummary {
    book: i64,
    research: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseSummary {
    total: i64,
    /// Major currency units (minor / 100).
    revenue: f64,
    by_type: TypeCounts,
}

#[derive(Debug, Serialize)]
struct TypeCounts {
    ebook: i64,
    hardcopy: i64,
    bundle: i64,
}

#[derive(Debug, Serialize)]
struct FunnelEvents {
    newsletter_signups: i64,
    payment_initiated: i64,
    payment_success: i64,
    payment_cancelled: i64,
}

/// Aggregate page views, downloads, purchases, and funnel events for the
/// operator dashboard.
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(secret) = state.config.analytics_secret.as_deref() {
        let supplied = query.key.as_deref().unwrap_or_default();
        if !signing::constant_time_eq(supplied, secret) {
            return Err(AppError::Unauthorized("Invalid analytics key".to_string()));
        }
    }

    let date = parse_date_filter(query.date.as_deref())?;

    let page_views = AnalyticsRepo::page_view_counts(&state.pool, date).await?;
    let downloads = DownloadRepo::counts_by_product(&state.pool, date).await?;
    let purchases = PurchaseRepo::totals_by_type(&state.pool, date).await?;
    let action_counts = AnalyticsRepo::action_counts(&state.pool, date).await?;

    // -- Page views --------------------------------------------------------
    let by_page: BTreeMap<String, i64> = page_views.into_iter().collect();
    let page_view_total = by_page.values().sum();

    // -- Downloads ---------------------------------------------------------
    let mut by_product = BTreeMap::new();
    let mut book_downloads = 0;
    let mut research_downloads = 0;
    for (product, count) in downloads {
        if analytics::is_research_product(&product) {
            research_downloads += count;
        } else {
            book_downloads += count;
        }
        *by_product
            .entry(analytics::product_display_name(&product))
            .or_insert(0) += count;
    }

    // -- Purchases ---------------------------------------------------------
    let mut purchase_total = 0;
    let mut revenue_minor = 0;
    let mut by_type = TypeCounts {
        ebook: 0,
        hardcopy: 0,
        bundle: 0,
    };
    for totals in purchases {
        purchase_total += totals.count;
        revenue_minor += totals.revenue_minor;
        match BookType::parse(&totals.book_type) {
            Some(BookType::Ebook) => by_type.ebook += totals.count,
            Some(BookType::Hardcopy) => by_type.hardcopy += totals.count,
            Some(BookType::Bundle) => by_type.bundle += totals.count,
            None => tracing::warn!(book_type = %totals.book_type, "Unknown book type in purchases"),
        }
    }

    // -- Funnel events -----------------------------------------------------
    let count_of = |action: &str| {
        action_counts
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    };
    let events = FunnelEvents {
        newsletter_signups: count_of(actions::NEWSLETTER_SIGNUP),
        payment_initiated: count_of(actions::PAYMENT_INITIATED),
        payment_success: count_of(actions::PAYMENT_SUCCESS),
        payment_cancelled: count_of(actions::PAYMENT_CANCELLED),
    };

    let summary = AnalyticsSummary {
        page_views: PageViewSummary {
            total: page_view_total,
            by_page,
        },
        downloads: DownloadSummary {
            total: book_downloads + research_downloads,
            by_product,
            by_product_summary: ProductSummary {
                book: book_downloads,
                research: research_downloads,
            },
        },
        purchases: PurchaseSummary {
            total: purchase_total,
            revenue: revenue_minor as f64 / 100.0,
            by_type,
        },
        events,
    };

    Ok(Json(json!({ "success": true, "data": summary })))
}

/// Parse the `date` filter. Absent and `total` both mean "everything".
fn parse_date_filter(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None => Ok(None),
        Some("total") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest("date must be YYYY-MM-DD or 'total'".to_string())),
    }
}
