//! Router-level tests that run without a reachable database.
//!
//! The pool is built unchecked, so handlers that need a connection fail
//! fast while routing, auth rejection and the OpenAPI document can be
//! exercised offline.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jobpilot::api::routes::create_router;
use jobpilot::config::Settings;
use jobpilot::AppState;

async fn test_router() -> axum::Router {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(
        "postgres://127.0.0.1:1/unreachable",
    );
    let pool = Pool::builder()
        .connection_timeout(Duration::from_millis(50))
        .build_unchecked(manager);

    let mut settings = Settings::default();
    settings.jwt.secret = "router-test-secret-that-is-long-enough!!".to_string();
    let state = AppState::new(pool, &settings);
    create_router(state)
}

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let router = test_router().await;
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], false);
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let router = test_router().await;
    for path in ["/api/v1/profile", "/api/v1/jobs", "/api/v1/analytics/summary"] {
        let response = router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::get("/api/v1/profile")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn openapi_document_lists_core_paths() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let paths = json["paths"].as_object().unwrap();
    for expected in [
        "/api/v1/auth/login",
        "/api/v1/auth/register",
        "/api/v1/jobs",
        "/api/v1/sync",
        "/api/v1/automation/sessions",
        "/api/v1/resume",
        "/health",
    ] {
        assert!(paths.contains_key(expected), "missing path {expected}");
    }
}

#[tokio::test]
async fn responses_carry_request_ids() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "test-correlation-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-correlation-id"
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let router = test_router().await;
    let response = router
        .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
