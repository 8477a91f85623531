//! Handlers for protected book downloads and free research papers.
//!
//! `/download` is gated by the signed-capability pipeline; `/download-research`
//! serves free content with only a catalog check. Both record the served
//! download best-effort: a recorder failure is logged and never turns a
//! working link into an error.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;

use folio_core::analytics;
use folio_core::capability::{self, DownloadParams};
use folio_core::catalog::{self, CatalogEntry};
use folio_db::models::download::NewDownload;
use folio_db::repositories::DownloadRepo;

use crate::error::{AppError, AppResult};
use crate::request_meta::request_meta;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /download
// ---------------------------------------------------------------------------

/// Capability fields as they arrive on the query string. Everything is
/// optional here so the presence check belongs to the verifier, which maps
/// each failure to its own status code.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub email: Option<String>,
    pub product: Option<String>,
    pub expires: Option<String>,
    pub sig: Option<String>,
}

/// Serve a purchased book against a signed, time-limited link.
pub async fn fetch_book(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let params = DownloadParams {
        email: query.email,
        product: query.product,
        expires: query.expires,
        sig: query.sig,
    };

    let (email, product) = capability::verify_download_request(
        &params,
        Utc::now().timestamp_millis(),
        state.config.download_secret.as_bytes(),
    )?;

    let entry = product.entry();
    let bytes = fetch_blob(&state, entry).await?;

    record_download(&state, &email, product.as_str().to_string(), &headers).await;

    tracing::info!(
        email = %email,
        product = product.as_str(),
        size = bytes.len(),
        "Book download served",
    );

    serve_pdf(entry, bytes)
}

// ---------------------------------------------------------------------------
// GET /download-research
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ResearchQuery {
    pub id: Option<String>,
}

/// Serve a free research paper. No signature: the catalog membership check
/// is the only gate, and it runs before any storage access.
pub async fn fetch_research(
    State(state): State<AppState>,
    Query(query): Query<ResearchQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let id = query.id.as_deref().unwrap_or_default();
    let entry = catalog::research_entry(id)
        .ok_or_else(|| AppError::BadRequest("Invalid paper ID".to_string()))?;

    let bytes = fetch_blob(&state, entry).await?;

    // Research papers are free; no email is collected.
    record_download(&state, "anonymous", analytics::research_product_key(id), &headers).await;

    tracing::info!(paper_id = id, size = bytes.len(), "Research download served");

    serve_pdf(entry, bytes)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a catalog entry's bytes, mapping an all-source miss to 404.
async fn fetch_blob(state: &AppState, entry: &CatalogEntry) -> Result<Bytes, AppError> {
    state
        .blobs
        .resolve(entry.object_key)
        .await
        .map_err(|err| AppError::InternalError(format!("blob resolution failed: {err}")))?
        .ok_or_else(|| AppError::NotFound("File not found. Please contact support.".to_string()))
}

/// Record a served download; failures are logged, never surfaced.
async fn record_download(state: &AppState, email: &str, product: String, headers: &HeaderMap) {
    let meta = request_meta(headers);
    let input = NewDownload {
        email: email.to_string(),
        product,
        user_agent: meta.user_agent,
        ip_address: meta.ip_address,
        referer: meta.referer,
    };
    if let Err(err) = DownloadRepo::record(&state.pool, &input).await {
        tracing::error!(error = %err, product = %input.product, "Failed to record download");
    }
}

/// Build the PDF attachment response.
fn serve_pdf(entry: &CatalogEntry, bytes: Bytes) -> AppResult<impl IntoResponse> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", entry.display_name))
            .expect("catalog display names are valid header values"),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from_str(&bytes.len().to_string())
            .expect("content length is a valid header value"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    Ok((headers, bytes))
}
