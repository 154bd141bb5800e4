//! Object storage for published videos.
//!
//! This crate provides:
//! - An S3 client (AWS, MinIO, R2, ...) for streaming uploads and presigned GETs
//! - The [`ObjectStore`] seam the upload pipeline publishes through
//! - Resolution of persisted locations into time-limited signed URLs

pub mod client;
pub mod error;
pub mod resolver;
pub mod store;

pub use client::{S3Client, S3Config};
pub use error::{StorageError, StorageResult};
pub use resolver::{LocationResolver, PRESIGN_EXPIRY};
pub use store::{video_object_key, ObjectStore};
