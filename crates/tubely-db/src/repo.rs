//! Repository seam for video records.

use async_trait::async_trait;
use tubely_models::{UserId, Video, VideoId};

use crate::error::DbResult;

/// Persistence for [`Video`] records.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Get a video by ID.
    async fn get(&self, id: &VideoId) -> DbResult<Option<Video>>;

    /// Insert a new record. Fails if the ID is taken.
    async fn create(&self, video: &Video) -> DbResult<()>;

    /// Replace an existing record, bumping `updated_at`. Returns the stored copy.
    async fn update(&self, video: &Video) -> DbResult<Video>;

    /// Delete a record.
    async fn delete(&self, id: &VideoId) -> DbResult<()>;

    /// All records owned by a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> DbResult<Vec<Video>>;
}
