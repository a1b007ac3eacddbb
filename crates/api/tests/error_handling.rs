//! Tests for `AppError` → HTTP response mapping.
//!
//! Calls `IntoResponse` directly on `AppError` values; no server or database
//! is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use vaxrecord_api::error::AppError;
use vaxrecord_core::error::CoreError;
use vaxrecord_db::RepoError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_is_a_bad_request() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Vaccine",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad request");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_reference_is_a_bad_request() {
    let err = AppError::Core(CoreError::InvalidReference {
        entity: "Patient",
        id: 9,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad request");
    assert_eq!(json["code"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn invalid_input_hides_the_detail() {
    let err = AppError::invalid_input("doseNumber: invalid digit found in string");

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({"error": "bad request", "code": "INVALID_INPUT"}));
}

#[tokio::test]
async fn inconsistent_state_is_a_server_fault() {
    let err = AppError::Core(CoreError::Inconsistent("dose 3 has no vaccine".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "internal error");
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn server_fault_does_not_leak_its_message() {
    let err = AppError::Core(CoreError::Inconsistent("secret vaccine 12 row".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json.to_string();
    assert!(
        !body.contains("secret"),
        "500 body must not contain the internal message: {body}"
    );
}

#[tokio::test]
async fn row_not_found_maps_to_not_found() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn pool_timeout_is_a_server_fault() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn repo_errors_keep_their_kind() {
    let err: AppError = RepoError::Core(CoreError::InvalidReference {
        entity: "Vaccine",
        id: 1,
    })
    .into();
    let (_, json) = error_to_response(err).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");

    let err: AppError = RepoError::Database(sqlx::Error::PoolClosed).into();
    let (status, _) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
