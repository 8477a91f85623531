#![allow(dead_code)] // each integration test binary uses a subset of these helpers

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use folio_api::config::AppConfig;
use folio_api::routes;
use folio_api::state::AppState;
use folio_gateway::PaystackClient;
use folio_store::{BlobResolver, BlobSource, LocalDiskSource};

/// Download signing secret used across the integration suites.
pub const TEST_DOWNLOAD_SECRET: &str = "test-download-secret";

/// Gateway secret used to sign synthetic webhook deliveries.
pub const TEST_GATEWAY_SECRET: &str = "sk_test_webhook_secret";

/// Build a test `AppConfig` with safe defaults.
///
/// The gateway secret is set (webhook signature tests need it) but the
/// client never reaches the network in tests: payment tests that would
/// call out override `paystack_secret_key` to `None` instead.
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        download_secret: TEST_DOWNLOAD_SECRET.to_string(),
        download_validity_hours: 24,
        paystack_secret_key: Some(TEST_GATEWAY_SECRET.to_string()),
        dev_mode: false,
        analytics_secret: None,
        storage_bucket: None,
        files_dir: "files".into(),
        webhook_notifications: false,
        admin_emails: vec![],
    }
}

/// Build the full application router with the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the full application router with all middleware layers, using the
/// given database pool and config.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. Blob resolution uses only the
/// local-disk source rooted at `config.files_dir`.
pub fn build_test_app_with(pool: PgPool, config: AppConfig) -> Router {
    let sources: Vec<Box<dyn BlobSource>> =
        vec![Box::new(LocalDiskSource::new(config.files_dir.clone()))];
    let blobs = Arc::new(BlobResolver::new(sources));

    let gateway = config
        .paystack_secret_key
        .as_ref()
        .map(|key| Arc::new(PaystackClient::new(key.clone())));

    let state = AppState {
        pool,
        config: Arc::new(config),
        blobs,
        gateway,
        mailer: None,
        subscribers: None,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a raw body and extra headers (webhook tests).
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: Vec<u8>,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
