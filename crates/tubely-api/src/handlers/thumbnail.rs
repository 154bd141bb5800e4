//! Thumbnail uploads.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use tracing::info;

use tubely_models::{Video, THUMBNAIL_POLICY};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::VideoIdPath;
use crate::handlers::upload::stage_upload_field;
use crate::handlers::videos::load_owned_video;
use crate::metrics;
use crate::state::AppState;

const THUMBNAIL_FIELD: &str = "thumbnail";

/// Random, URL-safe asset file name with the given extension.
fn random_asset_name(extension: &str) -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    format!("{}.{}", URL_SAFE_NO_PAD.encode(bytes), extension)
}

/// Upload a thumbnail image for a record.
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Video>> {
    let video = load_owned_video(&state, &video_id, &user).await?;

    let result = store_thumbnail(&state, video, multipart).await;
    metrics::record_upload("thumbnail", result.is_ok());
    result.map(Json)
}

async fn store_thumbnail(
    state: &AppState,
    mut video: Video,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Video> {
    let upload =
        stage_upload_field(multipart, THUMBNAIL_FIELD, &THUMBNAIL_POLICY, &state.staging).await?;
    metrics::record_upload_bytes("thumbnail", upload.file.size());

    let file_name = random_asset_name(upload.extension);
    tokio::fs::create_dir_all(&state.config.assets_root).await?;
    tokio::fs::copy(upload.file.path(), state.config.assets_root.join(&file_name)).await?;

    video.thumbnail_url = Some(state.config.asset_url(&file_name));
    let stored = state.videos.update(&video).await?;

    info!(
        video_id = %stored.id,
        file = %file_name,
        media_type = upload.media_type,
        "Stored thumbnail"
    );

    Ok(state.resolver.resolve(stored).await?)
}
