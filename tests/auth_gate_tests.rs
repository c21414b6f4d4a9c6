//! Auth gate integration tests
//!
//! These drive the real router with `tower::ServiceExt::oneshot` and
//! exercise the paths that never reach the database: token verification
//! (pure signature + clock checks) and request validation, which runs
//! before any query. The pool is created lazily and is never connected.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use quotewall_server::auth::{jwt, AuthService};
use quotewall_server::routes;
use quotewall_server::services::QuoteService;
use quotewall_server::state::AppState;

const SECRET: &str = "integration-test-secret";
const TTL_SECONDS: i64 = 3600;

fn test_app() -> Router {
    // Lazily-connected pool: handed to the services but never touched by
    // the requests in this file.
    let pool = PgPoolOptions::new()
        .connect_lazy("postgresql://postgres@localhost/quotewall_test")
        .expect("lazy pool construction cannot fail");

    let auth_service = Arc::new(AuthService::new(pool.clone(), SECRET.to_string(), TTL_SECONDS, 4));
    let quote_service = Arc::new(QuoteService::new(pool));

    Router::new()
        .merge(routes::auth_routes())
        .merge(routes::quote_routes())
        .with_state(AppState::new(auth_service, quote_service))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_verify_token(auth_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/verify-token");
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Token verification: 401 (no token) vs 403 (bad token)
// ============================================================================

#[tokio::test]
async fn verify_token_without_header_is_401() {
    let response = test_app().oneshot(get_verify_token(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn verify_token_with_malformed_header_is_401() {
    // Not a Bearer scheme: treated the same as a missing token.
    let response = test_app()
        .oneshot(get_verify_token(Some("Token abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn verify_token_with_valid_token_is_200() {
    let user_id = Uuid::new_v4();
    let token = jwt::issue_token(user_id, "ada@example.com", SECRET, TTL_SECONDS).unwrap();

    let response = test_app()
        .oneshot(get_verify_token(Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["id"], user_id.to_string());
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn verify_token_with_corrupted_token_is_403() {
    let token = jwt::issue_token(Uuid::new_v4(), "ada@example.com", SECRET, TTL_SECONDS).unwrap();
    let truncated = &token[..token.len() - 6];

    let response = test_app()
        .oneshot(get_verify_token(Some(&format!("Bearer {}", truncated))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn verify_token_signed_with_other_secret_is_403() {
    let token =
        jwt::issue_token(Uuid::new_v4(), "ada@example.com", "some-other-secret", TTL_SECONDS)
            .unwrap();

    let response = test_app()
        .oneshot(get_verify_token(Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn verify_token_with_expired_token_is_403() {
    // Issued two hours in the past with a one-hour TTL.
    let issued_at = Utc::now() - Duration::hours(2);
    let token = jwt::issue_token_at(
        issued_at,
        Uuid::new_v4(),
        "ada@example.com",
        SECRET,
        TTL_SECONDS,
    )
    .unwrap();

    let response = test_app()
        .oneshot(get_verify_token(Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// The gate protects the quote routes
// ============================================================================

#[tokio::test]
async fn quotes_feed_requires_authentication() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/quotes")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn quote_submission_with_bad_token_is_403() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/quotes")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text":"hello"}"#))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Registration validation (runs before any database access)
// ============================================================================

fn registration(overrides: &[(&str, serde_json::Value)]) -> serde_json::Value {
    let mut body = serde_json::json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "longenough1",
        "confirmPassword": "longenough1",
        "agreeToTerms": true,
    });
    for (key, value) in overrides {
        body[*key] = value.clone();
    }
    body
}

#[tokio::test]
async fn register_rejects_short_password() {
    let body = registration(&[
        ("password", serde_json::json!("short1")),
        ("confirmPassword", serde_json::json!("short1")),
    ]);

    let response = test_app()
        .oneshot(post_json("/api/register", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("at least 8 characters"));
}

#[tokio::test]
async fn register_rejects_password_mismatch() {
    let body = registration(&[("confirmPassword", serde_json::json!("different1"))]);

    let response = test_app()
        .oneshot(post_json("/api/register", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_missing_terms() {
    let body = registration(&[("agreeToTerms", serde_json::json!(false))]);

    let response = test_app()
        .oneshot(post_json("/api/register", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let body = registration(&[("email", serde_json::json!("not-an-email"))]);

    let response = test_app()
        .oneshot(post_json("/api/register", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_with_unparseable_body_keeps_error_shape() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}
