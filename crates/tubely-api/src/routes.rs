//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{MAX_THUMBNAIL_UPLOAD_BYTES, MAX_VIDEO_UPLOAD_BYTES};
use crate::handlers::health::health;
use crate::handlers::thumbnail::upload_thumbnail;
use crate::handlers::upload::upload_video;
use crate::handlers::videos::{create_video, delete_video, get_video, list_videos};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, hide_internal_errors, request_id, request_logging, request_span, security_headers,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let video_routes = Router::new()
        .route("/videos", post(create_video).get(list_videos))
        .route("/videos/:video_id", get(get_video).delete(delete_video))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size));

    // Upload routes carry their own body caps. The limit layer answers 413
    // on an oversized Content-Length and fails the body stream otherwise.
    let video_upload_routes = Router::new()
        .route("/video_upload/:video_id", post(upload_video))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_VIDEO_UPLOAD_BYTES));

    let thumbnail_upload_routes = Router::new()
        .route("/thumbnail_upload/:video_id", post(upload_thumbnail))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_THUMBNAIL_UPLOAD_BYTES));

    let api_routes = Router::new()
        .merge(video_routes)
        .merge(video_upload_routes)
        .merge(thumbnail_upload_routes);

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let mut router = Router::new()
        .nest("/api", api_routes)
        .nest_service("/assets", ServeDir::new(&state.config.assets_root))
        .merge(health_routes)
        .merge(metrics_routes);

    // Don't expose internal error details in production
    if state.config.is_production() {
        router = router.layer(middleware::from_fn(hide_internal_errors));
    }

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
