use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vaxrecord_core::error::CoreError;
use vaxrecord_db::RepoError;

/// Message carried by every client-error response.
pub const BAD_REQUEST_MESSAGE: &str = "bad request";

/// Message carried by every server-fault response.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and raw driver errors from sqlx.
/// Implements [`IntoResponse`] so every failure leaves the server in the same
/// `{ "error": ..., "code": ... }` shape. Client errors all carry the message
/// `"bad request"`; the `code` field says which kind it was.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vaxrecord_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(core) => AppError::Core(core),
            RepoError::Database(db) => AppError::Database(db),
        }
    }
}

impl AppError {
    /// Shorthand for an input coercion failure.
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        AppError::Core(CoreError::InvalidInput(detail.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Core(core) => {
                let code = match core {
                    CoreError::NotFound { entity, id } => {
                        tracing::debug!(entity, id, "Requested row not found");
                        "NOT_FOUND"
                    }
                    CoreError::InvalidReference { entity, id } => {
                        tracing::debug!(entity, id, "Foreign key does not resolve");
                        "INVALID_REFERENCE"
                    }
                    CoreError::InvalidInput(msg) => {
                        tracing::debug!(detail = %msg, "Rejected request input");
                        "INVALID_INPUT"
                    }
                    CoreError::Inconsistent(msg) => {
                        tracing::error!(error = %msg, "Inconsistent state");
                        "INTERNAL_ERROR"
                    }
                };
                let status = if core.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, code)
            }

            AppError::Database(err) => classify_sqlx_error(err),
        };

        let message = if status.is_client_error() {
            BAD_REQUEST_MESSAGE
        } else {
            INTERNAL_ERROR_MESSAGE
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and error code.
///
/// - `RowNotFound` maps to `NOT_FOUND`.
/// - Foreign key violations (`23503`) map to `INVALID_REFERENCE`; the
///   repositories check parents first, so this only fires on a race.
/// - Over-long strings (`22001`) and missing values (`23502`) map to
///   `INVALID_INPUT`.
/// - Everything else maps to 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::BAD_REQUEST, "NOT_FOUND"),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23503") => {
                tracing::debug!(
                    constraint = db_err.constraint().unwrap_or("unknown"),
                    "Foreign key violation"
                );
                (StatusCode::BAD_REQUEST, "INVALID_REFERENCE")
            }
            Some("22001") | Some("23502") => {
                tracing::debug!(error = %db_err, "Value rejected by column constraint");
                (StatusCode::BAD_REQUEST, "INVALID_INPUT")
            }
            _ => {
                tracing::error!(error = %db_err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}
