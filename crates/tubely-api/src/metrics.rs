//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "tubely_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "tubely_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "tubely_http_requests_in_flight";

    // Ingestion metrics
    pub const UPLOADS_TOTAL: &str = "tubely_uploads_total";
    pub const UPLOAD_BYTES: &str = "tubely_upload_bytes";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record the outcome of an upload (`video` or `thumbnail`).
pub fn record_upload(kind: &'static str, ok: bool) {
    let outcome = if ok { "success" } else { "failure" };
    counter!(names::UPLOADS_TOTAL, "kind" => kind, "outcome" => outcome).increment(1);
}

/// Record the size of a staged upload.
pub fn record_upload_bytes(kind: &'static str, bytes: u64) {
    histogram!(names::UPLOAD_BYTES, "kind" => kind).record(bytes as f64);
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    // Route template keeps IDs out of the label set
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
