//! Request extractors that coerce client input and reject it uniformly.
//!
//! Axum's stock `Path`/`Query`/`Json` rejections answer with plain-text
//! bodies; these wrappers turn every coercion failure into
//! [`CoreError::InvalidInput`](vaxrecord_core::error::CoreError::InvalidInput)
//! so it leaves through [`AppError`].

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;
use vaxrecord_core::types::DbId;

use crate::error::AppError;

/// Integer row identifier taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub DbId);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        Ok(ResourceId(id))
    }
}

/// Entity fields for create/update requests.
///
/// Read from a JSON body when the request declares a JSON content type,
/// otherwise from the query string (`?name=Ana&lastName=Silva`).
#[derive(Debug, Clone)]
pub struct Fields<T>(pub T);

impl<S, T> FromRequest<S> for Fields<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_json_content_type(req.headers()) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
            return Ok(Fields(value));
        }

        let Query(value) = Query::<T>::try_from_uri(req.uri())
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        Ok(Fields(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json")
                || mime
                    .rsplit_once('+')
                    .is_some_and(|(_, suffix)| suffix.eq_ignore_ascii_case("json"))
        })
        .unwrap_or(false)
}
