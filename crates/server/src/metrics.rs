use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "student_requests_total",
        "Student record requests by method, route and status",
        &["method", "route", "status"]
    )
    .expect("register student_requests_total")
});

pub static REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "student_request_duration_seconds",
        "Student record request duration in seconds",
        &["method", "route"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register student_request_duration_seconds")
});

pub fn observe(method: &str, route: &str, status: StatusCode, elapsed_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, route, status.as_str()])
        .inc();
    REQUEST_DURATION
        .with_label_values(&[method, route])
        .observe(elapsed_secs);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
