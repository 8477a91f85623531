//! Repository for the `downloads` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::download::{DownloadRecord, NewDownload};

const DOWNLOAD_COLUMNS: &str = "\
    id, email, product, user_agent, ip_address, referer, created_at";

/// Provides operations over served downloads.
pub struct DownloadRepo;

impl DownloadRepo {
    /// Record a served download.
    pub async fn record(
        pool: &PgPool,
        input: &NewDownload,
    ) -> Result<DownloadRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO downloads (email, product, user_agent, ip_address, referer) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {DOWNLOAD_COLUMNS}"
        );
        sqlx::query_as::<_, DownloadRecord>(&query)
            .bind(&input.email)
            .bind(&input.product)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .bind(&input.referer)
            .fetch_one(pool)
            .await
    }

    /// Download counts per recorded product key, optionally restricted to a
    /// single calendar day.
    pub async fn counts_by_product(
        pool: &PgPool,
        date: Option<NaiveDate>,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT product, COUNT(*)::bigint \
             FROM downloads \
             WHERE ($1::date IS NULL OR created_at::date = $1) \
             GROUP BY product \
             ORDER BY product",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }
}
