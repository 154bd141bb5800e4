//! Video record handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use tubely_models::{CreateVideoRequest, Video, VideoId};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::VideoIdPath;
use crate::state::AppState;

/// Load a record and check the caller owns it.
///
/// Missing records are 404. Records owned by someone else are 401.
pub(crate) async fn load_owned_video(
    state: &AppState,
    video_id: &VideoId,
    user: &AuthUser,
) -> ApiResult<Video> {
    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Couldn't find video"))?;

    if !video.is_owned_by(&user.user_id) {
        return Err(ApiError::unauthorized("Not authorized to access this video"));
    }

    Ok(video)
}

/// Create a draft video record owned by the caller.
pub async fn create_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateVideoRequest>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let video = Video::new(user.user_id, title, request.description);
    state.videos.create(&video).await?;

    info!(video_id = %video.id, user_id = %user.user_id, "Created draft video");
    Ok((StatusCode::CREATED, Json(video)))
}

/// List the caller's videos, newest first.
pub async fn list_videos(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Video>>> {
    let videos = state.videos.list_for_user(&user.user_id).await?;
    let videos = state.resolver.resolve_all(videos).await?;
    Ok(Json(videos))
}

/// Get one of the caller's videos.
pub async fn get_video(
    State(state): State<AppState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
) -> ApiResult<Json<Video>> {
    let video = load_owned_video(&state, &video_id, &user).await?;
    Ok(Json(state.resolver.resolve(video).await?))
}

/// Delete one of the caller's videos.
pub async fn delete_video(
    State(state): State<AppState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
) -> ApiResult<StatusCode> {
    load_owned_video(&state, &video_id, &user).await?;
    state.videos.delete(&video_id).await?;

    info!(video_id = %video_id, user_id = %user.user_id, "Deleted video");
    Ok(StatusCode::NO_CONTENT)
}
