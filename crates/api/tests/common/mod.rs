//! Shared helpers for HTTP integration tests.
//!
//! Requests go straight into the router through `tower::ServiceExt::oneshot`
//! without binding a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vaxrecord_api::config::ServerConfig;
use vaxrecord_api::router::build_app_router;
use vaxrecord_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. The database URL is unused because the
/// pool is injected by `#[sqlx::test]`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        legacy_error_status: false,
        database_url: String::new(),
        db_max_connections: 5,
    }
}

/// Build the full application router, with the same middleware stack as
/// production, on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Same as [`build_test_app`] but with legacy error statuses enabled.
pub fn build_legacy_app(pool: PgPool) -> Router {
    let mut config = test_config();
    config.legacy_error_status = true;
    build_app_with_config(pool, config)
}

fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PUT, uri, body).await
}

/// POST with the fields in the query string and no body.
pub async fn post_query(app: Router, uri_with_query: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri_with_query)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// PUT with the fields in the query string and no body.
pub async fn put_query(app: Router, uri_with_query: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri_with_query)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a patient through the API and return its id.
pub async fn create_patient(pool: &PgPool, name: &str, last_name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/patients",
        serde_json::json!({"name": name, "lastName": last_name}),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a vaccine for `patient_id` through the API and return its id.
pub async fn create_vaccine(pool: &PgPool, patient_id: i64, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/vaccines",
        serde_json::json!({
            "patientID": patient_id,
            "vaccineName": name,
            "doseDate": "2024-01-01",
            "doseNumber": 1,
            "vaccineType": "live"
        }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a dose for `vaccine_id` through the API and return its id.
pub async fn create_dose(pool: &PgPool, vaccine_id: i64, number: i64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/doses",
        serde_json::json!({
            "vaccineID": vaccine_id,
            "typeDose": "booster",
            "doseDate": "2024-02-01",
            "doseNumber": number,
            "applicationType": "intramuscular"
        }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
