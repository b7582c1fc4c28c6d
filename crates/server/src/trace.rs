//! Raw request/response trace for the student routes.
//!
//! Buffers both bodies, emits them on the `crud_trace` target (which the logging
//! setup appends to the trace file) and records per-route metrics.

use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use common::utils::logging::TRACE_TARGET;
use tracing::{error, info};

use crate::metrics;

/// Same cap as axum's default body limit.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn trace_bodies(matched: Option<MatchedPath>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = matched
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%method, %uri, error = %e, "failed to buffer request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    info!(
        target: TRACE_TARGET,
        %method,
        %uri,
        body = %String::from_utf8_lossy(&bytes),
        "request"
    );

    let res = next.run(Request::from_parts(parts, Body::from(bytes))).await;
    let status = res.status();
    metrics::observe(method.as_str(), &route, status, started.elapsed().as_secs_f64());

    let (parts, body) = res.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%method, %uri, error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    info!(
        target: TRACE_TARGET,
        %method,
        %uri,
        status = status.as_u16(),
        body = %String::from_utf8_lossy(&bytes),
        "response"
    );
    Response::from_parts(parts, Body::from(bytes))
}
