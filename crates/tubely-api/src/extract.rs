//! Path extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use tubely_models::VideoId;

use crate::error::ApiError;

/// `:video_id` path segment parsed as a UUID. Rejects with 400.
#[derive(Debug, Clone, Copy)]
pub struct VideoIdPath(pub VideoId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for VideoIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        raw.parse()
            .map(VideoIdPath)
            .map_err(|_| ApiError::bad_request("Invalid ID"))
    }
}
