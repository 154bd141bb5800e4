//! In-process repository.

use std::collections::HashMap;

use async_trait::async_trait;
use metrics::counter;
use tokio::sync::RwLock;
use tracing::{debug, info};

use tubely_models::{UserId, Video, VideoId};

use crate::error::{DbError, DbResult};
use crate::repo::VideoRepository;

/// [`VideoRepository`] held in memory. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<VideoId, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get(&self, id: &VideoId) -> DbResult<Option<Video>> {
        Ok(self.videos.read().await.get(id).cloned())
    }

    async fn create(&self, video: &Video) -> DbResult<()> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(DbError::already_exists(video.id));
        }
        videos.insert(video.id, video.clone());

        counter!("tubely_db_writes_total", "op" => "create").increment(1);
        info!("Created video record: {}", video.id);
        Ok(())
    }

    async fn update(&self, video: &Video) -> DbResult<Video> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| DbError::not_found(video.id))?;

        *stored = video.clone();
        stored.touch();

        counter!("tubely_db_writes_total", "op" => "update").increment(1);
        debug!(video_id = %video.id, "Updated video record");
        Ok(stored.clone())
    }

    async fn delete(&self, id: &VideoId) -> DbResult<()> {
        self.videos
            .write()
            .await
            .remove(id)
            .ok_or_else(|| DbError::not_found(id))?;

        counter!("tubely_db_writes_total", "op" => "delete").increment(1);
        info!("Deleted video record: {}", id);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> DbResult<Vec<Video>> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.is_owned_by(user_id))
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }
}
