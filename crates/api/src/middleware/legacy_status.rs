//! Compatibility mode for older clients that expect client errors to
//! arrive with the error body and HTTP 200.
//!
//! Enabled with `LEGACY_ERROR_STATUS=true`. The body is left untouched.

use axum::http::StatusCode;
use axum::response::Response;

/// Rewrite `400 Bad Request` responses to `200 OK`.
pub async fn downgrade_client_errors(mut response: Response) -> Response {
    if response.status() == StatusCode::BAD_REQUEST {
        *response.status_mut() = StatusCode::OK;
    }
    response
}
