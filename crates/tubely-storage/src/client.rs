//! S3 client implementation.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::store::ObjectStore;

/// Configuration for the S3 client.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket new objects are published to
    pub bucket: String,
    /// Region
    pub region: String,
    /// Custom S3 API endpoint (MinIO, R2, ...). `None` means AWS.
    pub endpoint_url: Option<String>,
    /// Static access key ID. `None` uses the default provider chain.
    pub access_key_id: Option<String>,
    /// Static secret access key
    pub secret_access_key: Option<String>,
    /// Use path-style addressing
    pub force_path_style: bool,
}

impl S3Config {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            bucket: std::env::var("S3_BUCKET")
                .map_err(|_| StorageError::config_error("S3_BUCKET not set"))?,
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok().filter(|s| !s.is_empty()),
            access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok().filter(|s| !s.is_empty()),
            secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            force_path_style: std::env::var("S3_FORCE_PATH_STYLE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    fn static_credentials(&self) -> StorageResult<Option<Credentials>> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Ok(Some(Credentials::new(id, secret, None, None, "tubely"))),
            (None, None) => Ok(None),
            _ => Err(StorageError::config_error(
                "S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must be set together",
            )),
        }
    }
}

/// S3 storage client.
#[derive(Clone)]
pub struct S3Client {
    client: Client,
    bucket: String,
}

impl S3Client {
    /// Create a new S3 client from configuration.
    pub async fn new(config: S3Config) -> StorageResult<Self> {
        let builder = match config.static_credentials()? {
            Some(credentials) => Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .credentials_provider(credentials),
            None => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await;
                Builder::from(&shared)
            }
        };

        let mut builder = builder.force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());
        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
            "S3 client configured"
        );

        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        let config = S3Config::from_env()?;
        Self::new(config).await
    }

    /// Check connectivity by performing a head bucket operation.
    pub async fn check_connectivity(&self) -> StorageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                StorageError::AwsSdk(format!(
                    "S3 connectivity check failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()> {
        debug!("Uploading {} to {}/{}", path.display(), self.bucket, key);
        let started = Instant::now();

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(format!("{}: {}", path.display(), e)))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                StorageError::upload_failed(format!(
                    "put_object {}/{}: {}",
                    self.bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        metrics::histogram!("tubely_storage_put_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        info!(key = %key, "Uploaded {} to {}", path.display(), self.bucket);
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::presign_failed(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| {
                StorageError::presign_failed(format!(
                    "get_object {}/{}: {}",
                    bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(presigned.uri().to_string())
    }
}
