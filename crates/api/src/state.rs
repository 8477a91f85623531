use std::sync::Arc;

use folio_gateway::PaystackClient;
use folio_notify::{Mailer, SubscriberStore};
use folio_store::BlobResolver;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<AppConfig>,
    /// Ordered blob sources for protected book files.
    pub blobs: Arc<BlobResolver>,
    /// Payment gateway client; `None` when the secret key is unconfigured.
    pub gateway: Option<Arc<PaystackClient>>,
    /// SMTP mailer; `None` when email delivery is unconfigured.
    pub mailer: Option<Arc<Mailer>>,
    /// Newsletter subscriber store; `None` when unconfigured.
    pub subscribers: Option<Arc<SubscriberStore>>,
}
