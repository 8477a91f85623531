//! Integration tests for the payment verification endpoint.
//!
//! The real gateway round-trip is covered by unit tests on the typed
//! response in `folio-gateway`; these tests exercise the request paths that
//! never reach the network.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;
use tempfile::TempDir;

fn dev_mode_app(pool: PgPool, dir: &TempDir) -> axum::Router {
    let mut config = common::test_config();
    config.paystack_secret_key = None;
    config.dev_mode = true;
    config.files_dir = dir.path().to_path_buf();
    common::build_test_app_with(pool, config)
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_reference_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({ "email": "buyer@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Payment reference is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_reference_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({ "reference": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Configuration gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unconfigured_gateway_in_production_mode_returns_500(pool: PgPool) {
    let mut config = common::test_config();
    config.paystack_secret_key = None;
    config.dev_mode = false;
    let app = common::build_test_app_with(pool, config);

    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({ "reference": "T1", "email": "buyer@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Payment system configuration error");
    assert!(json.get("downloadUrl").is_none(), "no capability on config error");
}

// ---------------------------------------------------------------------------
// Development bypass (explicitly gated behind dev mode)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn dev_mode_simulates_payment_and_issues_capability(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = dev_mode_app(pool, &dir);

    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({
            "reference": "DEV-1",
            "email": "dev@example.com",
            "includeBundle": true
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(
        json["message"].as_str().unwrap().contains("DEV MODE"),
        "simulated approvals must be clearly marked"
    );

    let url = json["downloadUrl"].as_str().unwrap();
    assert!(url.starts_with("/download?"));
    assert!(url.contains("product=bundle"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dev_mode_capability_actually_downloads(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("books")).unwrap();
    std::fs::write(dir.path().join("books/book.pdf"), b"%PDF-1.7 dev bytes").unwrap();

    let app = dev_mode_app(pool.clone(), &dir);
    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({ "reference": "DEV-2", "email": "dev@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["downloadUrl"]
        .as_str()
        .unwrap()
        .to_string();

    // The minted link works end to end against the download endpoint.
    let app = dev_mode_app(pool, &dir);
    let download = get(app, &url).await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers().get("content-type").unwrap(),
        "application/pdf"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dev_mode_requires_a_buyer_email(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = dev_mode_app(pool, &dir);

    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({ "reference": "DEV-3" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bypass_is_unreachable_outside_dev_mode(pool: PgPool) {
    // Same missing-credential setup as the dev tests, but without the mode
    // flag: the request must be refused, never simulated.
    let mut config = common::test_config();
    config.paystack_secret_key = None;
    config.dev_mode = false;
    let app = common::build_test_app_with(pool, config);

    let response = post_json(
        app,
        "/verify-payment",
        serde_json::json!({ "reference": "DEV-4", "email": "dev@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json.get("downloadUrl").is_none());
}
