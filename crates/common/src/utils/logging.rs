use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Target of the raw request/response trace events; only these reach the trace file.
pub const TRACE_TARGET: &str = "crud_trace";

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(default_env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize the console subscriber plus an append-only trace file.
///
/// Console output is compact text or JSON and honours `RUST_LOG`. Events emitted on
/// [`TRACE_TARGET`] are additionally appended to `trace_file`, without ANSI colours,
/// regardless of `RUST_LOG`.
pub fn init_logging_with_trace(json: bool, trace_file: impl AsRef<Path>) -> anyhow::Result<()> {
    let trace_file = trace_file.as_ref();
    if let Some(parent) = trace_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(trace_file)?;

    let console: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(io::stdout)
            .with_filter(default_env_filter())
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(io::stdout)
            .with_filter(default_env_filter())
            .boxed()
    };

    let trace = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .with_filter(Targets::new().with_target(TRACE_TARGET, Level::INFO));

    tracing_subscriber::registry()
        .with(console)
        .with(trace)
        .try_init()?;
    Ok(())
}
