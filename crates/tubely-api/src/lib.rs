//! Axum HTTP API server.
//!
//! This crate provides:
//! - Video upload ingestion (stage, classify, fast-start, publish)
//! - Thumbnail uploads served from a local assets directory
//! - Video record CRUD with presigned playback URLs
//! - HS256 bearer token authentication
//! - Security headers, request logging and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use auth::{AuthUser, JwtAuth};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
