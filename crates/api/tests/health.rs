//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use pronostiek_core::catalog::RiderCatalog;
use sqlx::PgPool;

#[tokio::test]
async fn health_is_degraded_without_database() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert_eq!(json["riders_loaded"], 20);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/renners").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /api/v1/renners");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/rulesets").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // A UUID: 36 chars with hyphens.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_is_ok_with_database_and_riders(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_is_degraded_with_empty_catalog(pool: PgPool) {
    let app = common::build_test_app_with_catalog(pool, RiderCatalog::empty());
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["riders_loaded"], 0);
}
