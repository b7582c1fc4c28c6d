//! Request body extraction for the student endpoints.
//!
//! Unlike `axum::Json`, a request without a `Content-Type` header is still parsed
//! as JSON, as existing clients send bodies that way. When the header is present
//! it must name `application/json` or an `application/*+json` subtype.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// JSON body whose failures surface as [`ApiError::Validation`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !accepts_json(req.headers()) {
            return Err(ApiError::Validation(
                "Expected request with `Content-Type: application/json`".into(),
            ));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::Validation(format!("Failed to deserialize the JSON body: {e}")))
    }
}
