//! Download entity models.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `downloads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DownloadRecord {
    pub id: DbId,
    pub email: String,
    /// `book`, `bundle`, or `research:<paper-id>`.
    pub product: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
    pub created_at: Timestamp,
}

/// Input for recording a served download.
#[derive(Debug, Clone)]
pub struct NewDownload {
    pub email: String,
    pub product: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}
