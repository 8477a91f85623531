//! Repository for the `purchases` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::purchase::{NewPurchase, Purchase, PurchaseTypeTotals};

// ---------------------------------------------------------------------------
// Column list
// ---------------------------------------------------------------------------

const PURCHASE_COLUMNS: &str = "\
    id, reference, email, book_type, amount_minor, currency, \
    customer_name, phone, delivery_address, source, created_at";

/// Provides operations over confirmed purchases.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Record a purchase unless its gateway reference is already present.
    ///
    /// Returns `Some(row)` when this call inserted the record, `None` when
    /// the reference was already recorded by the other confirmation path.
    /// The unique constraint on `reference` is the sole serialization point
    /// between the synchronous verification path and the webhook backstop.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &NewPurchase,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases \
                 (reference, email, book_type, amount_minor, currency, \
                  customer_name, phone, delivery_address, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT ON CONSTRAINT uq_purchases_reference DO NOTHING \
             RETURNING {PURCHASE_COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(&input.reference)
            .bind(&input.email)
            .bind(&input.book_type)
            .bind(input.amount_minor)
            .bind(&input.currency)
            .bind(&input.customer_name)
            .bind(&input.phone)
            .bind(&input.delivery_address)
            .bind(&input.source)
            .fetch_optional(pool)
            .await
    }

    /// Find a purchase by its gateway reference.
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!("SELECT {PURCHASE_COLUMNS} FROM purchases WHERE reference = $1");
        sqlx::query_as::<_, Purchase>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// Purchase count and revenue per book type, optionally restricted to a
    /// single calendar day.
    pub async fn totals_by_type(
        pool: &PgPool,
        date: Option<NaiveDate>,
    ) -> Result<Vec<PurchaseTypeTotals>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseTypeTotals>(
            "SELECT book_type, \
                    COUNT(*)::bigint AS count, \
                    COALESCE(SUM(amount_minor), 0)::bigint AS revenue_minor \
             FROM purchases \
             WHERE ($1::date IS NULL OR created_at::date = $1) \
             GROUP BY book_type \
             ORDER BY book_type",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }
}
