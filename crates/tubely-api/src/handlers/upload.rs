//! Video upload ingestion.
//!
//! `POST /api/video_upload/:video_id` takes a multipart `video` part, stages
//! it on local disk, classifies its geometry, remuxes it for fast start and
//! publishes the result under `<geometry>/<uuid>.mp4`. The record's location
//! is only written once the publish succeeded.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{debug, info, warn};

use tubely_media::{StagedFile, StagingArea};
use tubely_models::{MediaPolicy, StoredLocation, Video, VIDEO_POLICY};
use tubely_storage::{video_object_key, StorageError};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::VideoIdPath;
use crate::handlers::videos::load_owned_video;
use crate::metrics;
use crate::state::AppState;

/// Multipart field carrying the video.
const VIDEO_FIELD: &str = "video";

/// An accepted multipart file part, written to a fresh staging directory.
pub(crate) struct StagedUpload {
    pub file: StagedFile,
    pub media_type: &'static str,
    pub extension: &'static str,
}

/// Find the named file part, check its declared type against `policy`, then
/// stream it to disk. Nothing is staged for a rejected type.
pub(crate) async fn stage_upload_field(
    multipart: Result<Multipart, MultipartRejection>,
    field_name: &str,
    policy: &MediaPolicy,
    staging: &StagingArea,
) -> ApiResult<StagedUpload> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let declared = field.content_type().unwrap_or_default().to_string();
        let (media_type, extension) = policy.lookup(&declared).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Invalid file type {:?}, expected one of: {}",
                declared,
                policy.media_types().collect::<Vec<_>>().join(", ")
            ))
        })?;

        let mut file = staging.stage(&format!("upload.{}", extension)).await?;
        while let Some(chunk) = field.chunk().await.map_err(ApiError::from_multipart)? {
            file.write_chunk(&chunk).await?;
        }
        file.seal().await?;

        return Ok(StagedUpload {
            file,
            media_type,
            extension,
        });
    }

    Err(ApiError::bad_request(format!(
        "Couldn't find a '{}' file field",
        field_name
    )))
}

/// Upload and publish the video payload of a record.
pub async fn upload_video(
    State(state): State<AppState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Video>> {
    let video = load_owned_video(&state, &video_id, &user).await?;
    info!(video_id = %video_id, user_id = %user.user_id, "Uploading video");

    let result = ingest(&state, video, multipart).await;
    metrics::record_upload("video", result.is_ok());
    if let Err(e) = &result {
        warn!(video_id = %video_id, "Video upload failed: {}", e);
    }

    result.map(Json)
}

async fn ingest(
    state: &AppState,
    mut video: Video,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Video> {
    // Dropping `upload` removes the staging directory and everything in it.
    let upload = stage_upload_field(multipart, VIDEO_FIELD, &VIDEO_POLICY, &state.staging).await?;
    metrics::record_upload_bytes("video", upload.file.size());
    debug!(
        path = %upload.file.path().display(),
        size = upload.file.size(),
        "Staged video upload"
    );

    let geometry = state.inspector.classify(upload.file.path()).await?;

    let optimized = upload.file.derived_path("processing");
    state
        .optimizer
        .fast_start(upload.file.path(), &optimized)
        .await?;

    let key = video_object_key(geometry);
    let location = StoredLocation::new(state.store.bucket(), &key).map_err(StorageError::from)?;
    state
        .store
        .put_file(&key, &optimized, upload.media_type)
        .await?;

    video.video_url = Some(location.encode());
    let stored = state.videos.update(&video).await?;

    info!(
        video_id = %stored.id,
        key = %key,
        aspect = geometry.ratio_label(),
        "Published video"
    );

    Ok(state.resolver.resolve(stored).await?)
}
