//! Object store seam.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use tubely_models::Geometry;

use crate::error::StorageResult;

/// Blob storage the upload pipeline publishes to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket new objects are written to.
    fn bucket(&self) -> &str;

    /// Upload a local file to `key` in [`ObjectStore::bucket`], overwriting any
    /// existing object. The file is streamed from disk.
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()>;

    /// Presigned GET URL for an object, valid for `expires_in`.
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;
}

/// Fresh object key for a published video: `<geometry>/<uuid>.mp4`.
pub fn video_object_key(geometry: Geometry) -> String {
    format!("{}/{}.mp4", geometry.key_prefix(), Uuid::new_v4())
}
