//! Repository for the `analytics_events` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::analytics_event::{AnalyticsEvent, NewAnalyticsEvent};

const EVENT_COLUMNS: &str = "\
    id, action, category, label, value, metadata, \
    user_agent, ip_address, referer, created_at";

/// Provides operations over recorded analytics events.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Record an analytics event.
    pub async fn record_event(
        pool: &PgPool,
        input: &NewAnalyticsEvent,
    ) -> Result<AnalyticsEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO analytics_events \
                 (action, category, label, value, metadata, user_agent, ip_address, referer) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, AnalyticsEvent>(&query)
            .bind(&input.action)
            .bind(&input.category)
            .bind(&input.label)
            .bind(input.value)
            .bind(&input.metadata)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .bind(&input.referer)
            .fetch_one(pool)
            .await
    }

    /// Page-view counts per page label, optionally restricted to a single
    /// calendar day. Events without a label count toward `/`.
    pub async fn page_view_counts(
        pool: &PgPool,
        date: Option<NaiveDate>,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT COALESCE(label, '/') AS page, COUNT(*)::bigint \
             FROM analytics_events \
             WHERE action = 'page_view' \
               AND ($1::date IS NULL OR created_at::date = $1) \
             GROUP BY page \
             ORDER BY page",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Event counts per action, optionally restricted to a single calendar
    /// day.
    pub async fn action_counts(
        pool: &PgPool,
        date: Option<NaiveDate>,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT action, COUNT(*)::bigint \
             FROM analytics_events \
             WHERE ($1::date IS NULL OR created_at::date = $1) \
             GROUP BY action \
             ORDER BY action",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }
}
