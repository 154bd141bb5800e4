//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tubely_media::MediaToolsConfig;

/// Hard cap on a video upload request body.
pub const MAX_VIDEO_UPLOAD_BYTES: usize = 1 << 30;

/// Hard cap on a thumbnail upload request body.
pub const MAX_THUMBNAIL_UPLOAD_BYTES: usize = 10 << 20;

/// Default whole-request timeout in seconds. Must outlast the remux timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 900;

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Request timeout
    pub request_timeout: Duration,
    /// Max request body size outside the upload routes
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// HS256 key for bearer tokens
    pub jwt_secret: String,
    /// Directory thumbnails are written to and served from
    pub assets_root: PathBuf,
    /// Root of per-request staging directories
    pub staging_dir: PathBuf,
    /// Origin prefixed to thumbnail URLs
    pub public_base_url: String,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// FFprobe/FFmpeg locations
    pub media: MediaToolsConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8091,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_body_size: 10 * 1024 * 1024, // 10MB
            environment: "development".to_string(),
            jwt_secret: String::new(),
            assets_root: PathBuf::from("./assets"),
            staging_dir: std::env::temp_dir(),
            public_base_url: "http://localhost:8091".to_string(),
            metrics_enabled: true,
            media: MediaToolsConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8091);

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));
        url::Url::parse(&public_base_url).map_err(|e| ConfigError::Invalid {
            name: "PUBLIC_BASE_URL",
            reason: e.to_string(),
        })?;

        let request_timeout = Duration::from_secs(
            std::env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );
        let media = MediaToolsConfig::from_env();
        check_timeouts(request_timeout, &media)?;

        Ok(Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            request_timeout,
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            jwt_secret,
            assets_root: std::env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assets")),
            staging_dir: std::env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            public_base_url,
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            media,
        })
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// Public URL of a file in the assets directory.
    pub fn asset_url(&self, file_name: &str) -> String {
        format!(
            "{}/assets/{}",
            self.public_base_url.trim_end_matches('/'),
            file_name
        )
    }
}

/// The request timeout has to leave room for a remux that runs to its own limit.
fn check_timeouts(request_timeout: Duration, media: &MediaToolsConfig) -> Result<(), ConfigError> {
    if request_timeout.as_secs() <= media.ffmpeg_timeout_secs {
        return Err(ConfigError::Invalid {
            name: "REQUEST_TIMEOUT",
            reason: format!(
                "{}s does not exceed FFMPEG_TIMEOUT_SECS ({}s)",
                request_timeout.as_secs(),
                media.ffmpeg_timeout_secs
            ),
        });
    }
    Ok(())
}
