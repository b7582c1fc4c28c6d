use axum::{
    extract::{Path, State},
    Json,
};
use models::{student::parse_student_id, StudentRecord};
use service::errors::ServiceError;
use tracing::{error, info, warn};

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::routes::AppState;
use crate::wire::{self, DataResponse, CREATED_MESSAGE, DELETED_MESSAGE};

/// Map a read/update/delete failure onto the shared 404, logging which cause it was.
fn collapse(op: &'static str, id: i64, err: ServiceError) -> ApiError {
    if err.is_not_found() {
        warn!(op, id, "student not found");
    } else {
        error!(op, id, error = %err, "student store operation failed");
    }
    ApiError::NotFoundOrStoreError
}

fn path_id(op: &'static str, raw: &str) -> Result<i64, ApiError> {
    parse_student_id(raw).map_err(|e| {
        warn!(op, raw_id = %raw, error = %e, "rejected path id");
        ApiError::NotFoundOrStoreError
    })
}

#[utoipa::path(
    post, path = "/student-write", tag = "students",
    request_body = crate::openapi::StudentRecordDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::MessageResponse),
        (status = 404, description = "A record with this Id already exists", body = crate::openapi::MessageResponse),
        (status = 422, description = "Validation Error"),
        (status = 500, description = "Store error")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<StudentRecord>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    match state.students.create(&record).await {
        Ok(()) => {
            info!(id = record.id, "created student");
            Ok(Json(DataResponse::new(CREATED_MESSAGE)))
        }
        // Conflict reuses the not-found body and status.
        Err(ServiceError::AlreadyExists(id)) => {
            warn!(id, "student already exists");
            Err(ApiError::NotFoundOrStoreError)
        }
        Err(e) => {
            error!(id = record.id, error = %e, "create student failed");
            Err(ApiError::Internal)
        }
    }
}

#[utoipa::path(
    get, path = "/student/{Id}", tag = "students",
    params(("Id" = String, Path, description = "Student Id")),
    responses(
        (status = 200, description = "Record as a JSON-encoded string", body = crate::openapi::MessageResponse),
        (status = 404, description = "Absent or store error", body = crate::openapi::MessageResponse)
    )
)]
pub async fn read_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<String>>, ApiError> {
    let id = path_id("read", &raw_id)?;
    let record = state
        .students
        .read(id)
        .await
        .map_err(|e| collapse("read", id, e))?;
    let encoded = wire::to_python_json(&record).map_err(|e| {
        error!(id, error = %e, "encode student failed");
        ApiError::NotFoundOrStoreError
    })?;
    Ok(Json(DataResponse::new(encoded)))
}

#[utoipa::path(
    put, path = "/student/update/{Id}", tag = "students",
    params(("Id" = String, Path, description = "Student Id")),
    request_body = crate::openapi::StudentRecordDoc,
    responses(
        (status = 200, description = "Updated record", body = crate::openapi::StudentResponse),
        (status = 404, description = "Absent or store error", body = crate::openapi::MessageResponse),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(record): JsonBody<StudentRecord>,
) -> Result<Json<DataResponse<StudentRecord>>, ApiError> {
    let id = path_id("update", &raw_id)?;
    let updated = state
        .students
        .update(id, &record)
        .await
        .map_err(|e| collapse("update", id, e))?;
    info!(id, "updated student");
    Ok(Json(DataResponse::new(updated)))
}

#[utoipa::path(
    delete, path = "/student/delete/{Id}", tag = "students",
    params(("Id" = String, Path, description = "Student Id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponse),
        (status = 404, description = "Absent or store error", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    let id = path_id("delete", &raw_id)?;
    state
        .students
        .delete(id)
        .await
        .map_err(|e| collapse("delete", id, e))?;
    info!(id, "deleted student");
    Ok(Json(DataResponse::new(DELETED_MESSAGE)))
}
