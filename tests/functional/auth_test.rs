//! Functional tests for admin token authentication

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use imagegen_gateway::middleware::auth::{AdminTokenLayer, ADMIN_TOKEN_HEADER};
use tower::ServiceExt;

use common::{body_json, build_app, json_request};

fn create_test_app() -> Router {
    Router::new()
        .route("/test", axum::routing::get(|| async { "OK" }))
        .layer(AdminTokenLayer::new(Some("valid-token")))
}

#[tokio::test]
async fn test_auth_with_valid_token() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/test")
                .header(ADMIN_TOKEN_HEADER, "valid-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_with_invalid_token() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/test")
                .header(ADMIN_TOKEN_HEADER, "wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "unauthorized");
}

#[tokio::test]
async fn test_auth_with_same_length_wrong_token() {
    let app = create_test_app();

    for token in ["valid-tokeN", "xalid-token", "valid-toke"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/test")
                    .header(ADMIN_TOKEN_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "token {token}");
    }
}

#[tokio::test]
async fn test_auth_without_header() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_authorization_is_not_accepted() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/test")
                .header("authorization", "Bearer valid-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_no_token_configured_allows_all() {
    let app = Router::new()
        .route("/test", axum::routing::get(|| async { "OK" }))
        .layer(AdminTokenLayer::new(None));

    // Open mode: no token configured means every request passes
    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let (app, _) = build_app(Some("s3cret"), vec![]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin-settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin-settings/reset",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin-settings")
                .header(ADMIN_TOKEN_HEADER, "s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_generation_bypass_admin_token() {
    let (app, _) = build_app(Some("s3cret"), vec![]);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Reaches the dispatcher (and fails validation) rather than being rejected as unauthorized
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate-images",
            serde_json::json!({ "provider": "replicate" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
