mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::{Router, routing::get};
use axum_test::TestServer;
use hal_renderer::api::handlers::health_handler;
use hal_renderer::routes::app_router;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(common::create_test_state());

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/json");

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("_links").is_none());
}

#[tokio::test]
async fn test_health_body_has_unescaped_slashes() {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(common::create_test_state());

    let server = TestServer::new(app).unwrap();

    let text = server.get("/health").await.text();
    assert!(text.contains(r#""entrypoint":"/widgets""#));
}

#[tokio::test]
async fn test_app_router_trims_trailing_slash() {
    let app = app_router(common::create_test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/widgets/3/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["_links"]["self"]["href"], "/widgets/3");
}

#[tokio::test]
async fn test_app_router_fallback() {
    let app = app_router(common::create_test_state());

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
}
