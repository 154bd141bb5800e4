//! Shared data models for the Tubely backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video records and their identifiers
//! - Geometry categories derived from frame dimensions
//! - The persisted object location codec
//! - Accepted upload media types

pub mod geometry;
pub mod location;
pub mod media_type;
pub mod video;

// Re-export common types
pub use geometry::{Geometry, ASPECT_TOLERANCE};
pub use location::{LocationError, LocationForm, StoredLocation};
pub use media_type::{MediaPolicy, THUMBNAIL_POLICY, VIDEO_POLICY};
pub use video::{CreateVideoRequest, IdParseError, UserId, Video, VideoId};
