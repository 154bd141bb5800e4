//! Application state.

use std::sync::Arc;

use tracing::warn;

use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_media::{FfmpegOptimizer, FfprobeInspector, MediaInspector, MediaOptimizer, StagingArea};
use tubely_storage::{LocationResolver, ObjectStore, S3Client};

use crate::auth::JwtAuth;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub auth: Arc<JwtAuth>,
    pub videos: Arc<dyn VideoRepository>,
    pub store: Arc<dyn ObjectStore>,
    pub resolver: LocationResolver,
    pub inspector: Arc<dyn MediaInspector>,
    pub optimizer: Arc<dyn MediaOptimizer>,
    pub staging: StagingArea,
}

impl AppState {
    /// Create new application state with the production adapters.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let store = S3Client::from_env().await?;
        if let Err(e) = store.check_connectivity().await {
            warn!("Object store not reachable yet: {}", e);
        }
        let inspector = FfprobeInspector::new(config.media.ffprobe_path.clone());
        let optimizer = FfmpegOptimizer::from_config(&config.media);

        tokio::fs::create_dir_all(&config.assets_root).await?;

        Ok(Self::from_parts(
            config,
            Arc::new(InMemoryVideoRepository::new()),
            Arc::new(store),
            Arc::new(inspector),
            Arc::new(optimizer),
        ))
    }

    /// Assemble state from explicit service implementations.
    pub fn from_parts(
        config: ApiConfig,
        videos: Arc<dyn VideoRepository>,
        store: Arc<dyn ObjectStore>,
        inspector: Arc<dyn MediaInspector>,
        optimizer: Arc<dyn MediaOptimizer>,
    ) -> Self {
        Self {
            auth: Arc::new(JwtAuth::new(&config.jwt_secret)),
            resolver: LocationResolver::new(Arc::clone(&store)),
            staging: StagingArea::new(config.staging_dir.clone()),
            config,
            videos,
            store,
            inspector,
            optimizer,
        }
    }
}
