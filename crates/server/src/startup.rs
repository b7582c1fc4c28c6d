use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{runtime, student::StudentService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils, including the request trace file.
pub fn init_logging(cfg: &AppConfig) -> anyhow::Result<()> {
    common::utils::logging::init_logging_with_trace(cfg.logging.json, &cfg.logging.trace_file)
}

/// Any origin, method and header is accepted.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the application around an already constructed service.
pub fn build_app(students: StudentService) -> Router {
    routes::build_router(AppState { students }, build_cors())
}

/// Public entry: build the store and the app, then run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = runtime::build_store(&cfg.store).await?;
    let app = build_app(StudentService::new(Arc::clone(&store)));

    let addr = bind_addr(&cfg)?;
    info!(%addr, table = %store.table_name(), "starting student records server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
