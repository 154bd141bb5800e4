//! Video record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a path or token carries a malformed identifier.
#[derive(Debug, Error)]
#[error("Invalid identifier: {0}")]
pub struct IdParseError(String);

/// Unique identifier of a video record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub Uuid);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError(s.to_string()))
    }
}

impl From<Uuid> for VideoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Unique identifier of a user (the `sub` of a verified token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError(s.to_string()))
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Video record as held by the metadata store.
///
/// `video_url` holds a persisted location string (see [`crate::StoredLocation`])
/// while stored, and a presigned URL once resolved for a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Unique video ID
    pub id: VideoId,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Thumbnail URL (served from the local assets directory)
    pub thumbnail_url: Option<String>,

    /// Location of the published video payload
    pub video_url: Option<String>,

    /// Video title
    pub title: String,

    /// Video description
    #[serde(default)]
    pub description: String,

    /// User ID (owner)
    pub user_id: UserId,
}

impl Video {
    /// Create a new draft record with no payload yet.
    pub fn new(user_id: UserId, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: VideoId::new(),
            created_at: now,
            updated_at: now,
            thumbnail_url: None,
            video_url: None,
            title: title.into(),
            description: description.into(),
            user_id,
        }
    }

    /// Whether the given user owns this record.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Mark the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Request body for creating a draft video record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
