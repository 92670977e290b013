#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chub_database::Database;
use chub_domain::config::ApiConfig;
use chub_kernel::server::ApiState;
use chub_kernel::server::router::system_router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

fn test_state() -> ApiState {
    let options = "postgres://localhost:5432/unused".parse().expect("connect options");
    let database = Database::from_pool(PgPoolOptions::new().connect_lazy_with(options));
    ApiState::builder()
        .config(ApiConfig::default())
        .db(database)
        .build()
        .expect("state builds")
}

#[tokio::test(flavor = "current_thread")]
async fn health_answers_up_without_touching_the_database() {
    let (router, _doc) =
        OpenApiRouter::new().merge(system_router()).with_state(test_state()).split_for_parts();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("no-store, no-cache, must-revalidate")
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["status"], "up");
    assert!(body["version"].is_string());
    assert!(body["uptime"].is_number());
}

#[tokio::test(flavor = "current_thread")]
async fn health_route_is_documented() {
    let (_router, doc) =
        OpenApiRouter::new().merge(system_router()).with_state::<()>(test_state()).split_for_parts();

    assert!(doc.paths.paths.contains_key("/health"));
}
