//! Storage error types.

use thiserror::Error;
use tubely_models::LocationError;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to configure storage client: {0}")]
    ConfigError(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error(transparent)]
    InvalidLocation(#[from] LocationError),

    #[error("AWS SDK error: {0}")]
    AwsSdk(String),
}

impl StorageError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }

    pub fn presign_failed(msg: impl Into<String>) -> Self {
        Self::PresignFailed(msg.into())
    }
}
