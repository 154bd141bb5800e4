//! Resolution of persisted locations into signed URLs.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use tubely_models::{LocationForm, StoredLocation, Video};

use crate::error::StorageResult;
use crate::store::ObjectStore;

/// Lifetime of every presigned URL handed to clients.
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(60 * 60);

/// Replaces a record's stored location with a presigned GET URL.
#[derive(Clone)]
pub struct LocationResolver {
    store: Arc<dyn ObjectStore>,
    expires_in: Duration,
}

impl LocationResolver {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            expires_in: PRESIGN_EXPIRY,
        }
    }

    /// Resolve a record for a response.
    ///
    /// Takes the record by value so the persisted copy is never touched.
    /// A record without a location is returned unchanged.
    pub async fn resolve(&self, mut video: Video) -> StorageResult<Video> {
        let Some(raw) = video.video_url.as_deref() else {
            return Ok(video);
        };

        let (location, form) = StoredLocation::parse_with_form(raw)?;
        if form == LocationForm::LegacyUrl {
            warn!(
                video_id = %video.id,
                bucket = %location.bucket,
                "Resolving legacy URL-form location"
            );
        }

        let url = self
            .store
            .presign_get(&location.bucket, &location.key, self.expires_in)
            .await?;
        debug!(video_id = %video.id, key = %location.key, "Presigned video location");

        video.video_url = Some(url);
        Ok(video)
    }

    /// Resolve every record, failing on the first error.
    pub async fn resolve_all(&self, videos: Vec<Video>) -> StorageResult<Vec<Video>> {
        let mut resolved = Vec::with_capacity(videos.len());
        for video in videos {
            resolved.push(self.resolve(video).await?);
        }
        Ok(resolved)
    }
}
