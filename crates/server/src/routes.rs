use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use common::types::Health;
use service::student::StudentService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{metrics, openapi::ApiDoc, trace};

pub mod students;

/// Shared handler state: the student service over the injected store.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: student CRUD, health, metrics and API docs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let student_routes = Router::new()
        .route("/student-write", post(students::create_student))
        .route("/student/:id", get(students::read_student))
        .route("/student/update/:id", put(students::update_student))
        .route("/student/delete/:id", delete(students::delete_student))
        .route_layer(middleware::from_fn(trace::trace_bodies));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    public
        .merge(student_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
