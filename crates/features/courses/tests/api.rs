#![cfg(feature = "server")]

//! Router-level tests against an unreachable database: every request that the
//! contract rejects must be answered before the data layer is touched, and
//! requests that pass validation must surface the storage failure as a
//! generic server error.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chub_courses::courses_router;
use chub_database::Database;
use chub_domain::config::ApiConfig;
use chub_kernel::server::ApiState;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

/// A pool pointing at a port nothing listens on; acquiring fails fast.
fn unreachable_database() -> Database {
    let options = "postgres://127.0.0.1:1/unreachable".parse().expect("connect options");
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(options);
    Database::from_pool(pool)
}

fn test_router() -> (Router, utoipa::openapi::OpenApi) {
    let config = ApiConfig::default();
    let database = unreachable_database();
    let slice = chub_courses::init(&config, &database).expect("feature init");
    let state = ApiState::builder()
        .config(config)
        .db(database)
        .register_slice(slice)
        .build()
        .expect("state builds");

    OpenApiRouter::new().merge(courses_router()).with_state(state).split_for_parts()
}

fn post_json(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("encode body")))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn short_titles_are_rejected_before_storage() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json(&serde_json::json!({ "title": "Rust", "description": null })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().expect("message").contains("5 characters"));
}

#[tokio::test]
async fn missing_description_key_is_rejected_before_storage() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json(&serde_json::json!({ "title": "Rust for Rustaceans" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().expect("message").contains("description"));
}

#[tokio::test]
async fn unknown_body_fields_are_a_client_error() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json(&serde_json::json!({
            "title": "Rust for Rustaceans",
            "description": null,
            "price": 10
        })))
        .await
        .expect("response");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn valid_payloads_surface_storage_failures_as_server_errors() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json(
            &serde_json::json!({ "title": "Rust for Rustaceans", "description": "deep dive" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // The cause stays in the logs; the client gets a generic body.
    let body = json_body(response).await;
    assert_eq!(body["message"], "internal server error");
}

#[tokio::test]
async fn invalid_order_by_is_rejected_before_any_query() {
    let (router, _) = test_router();

    let response =
        router.oneshot(get("/courses?orderBy=description")).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_page_is_rejected_before_any_query() {
    let (router, _) = test_router();

    let response = router.oneshot(get("/courses?page=first")).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn valid_listings_surface_storage_failures_as_server_errors() {
    let (router, _) = test_router();

    let response =
        router.oneshot(get("/courses?search=rust&orderBy=title&page=2")).await.expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn both_operations_are_documented_under_the_courses_path() {
    let (_, doc) = test_router();

    let doc = serde_json::to_value(&doc).expect("openapi serializes");
    assert!(doc["paths"]["/courses"]["post"].is_object());
    assert!(doc["paths"]["/courses"]["get"].is_object());
}
