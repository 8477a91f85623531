//! Purchase entity models.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `purchases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Purchase {
    pub id: DbId,
    /// Gateway-assigned transaction reference (unique).
    pub reference: String,
    pub email: String,
    /// `ebook`, `hardcopy`, or `bundle`.
    pub book_type: String,
    /// Amount in gateway minor units (pesewas).
    pub amount_minor: i64,
    pub currency: String,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    /// Which path recorded the purchase: `verify` or `webhook`.
    pub source: String,
    pub created_at: Timestamp,
}

/// Input for recording a confirmed purchase.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub reference: String,
    pub email: String,
    pub book_type: String,
    pub amount_minor: i64,
    pub currency: String,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub source: String,
}

/// Purchase count and revenue aggregates for one book type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseTypeTotals {
    pub book_type: String,
    pub count: i64,
    pub revenue_minor: i64,
}
