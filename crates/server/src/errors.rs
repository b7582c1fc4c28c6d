use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::wire::{DataResponse, NOT_FOUND_MESSAGE};

/// Outcomes of the student endpoints as seen by clients.
///
/// Absence and store failures share one variant: read, update and delete
/// answer both with the same 404 body.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Request body did not match the record shape.
    Validation(String),
    NotFoundOrStoreError,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::NotFoundOrStoreError => {
                (StatusCode::NOT_FOUND, Json(DataResponse::new(NOT_FOUND_MESSAGE))).into_response()
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": { "error": "Internal Server Error" } })),
            )
                .into_response(),
        }
    }
}
