//! Test fixtures: fake media tools, a recording object store and request helpers.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use tubely_api::{create_router, ApiConfig, AppState};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_media::{MediaError, MediaInspector, MediaOptimizer, MediaResult};
use tubely_models::{Geometry, UserId, Video};
use tubely_storage::{ObjectStore, StorageError, StorageResult};

pub const BUCKET: &str = "tubely-test";
pub const SIGNER: &str = "https://signer.example.test";
pub const JWT_SECRET: &str = "integration-secret";
pub const BOUNDARY: &str = "tubely-test-boundary";

/// Inspector returning a fixed geometry.
pub struct FakeInspector {
    pub geometry: Option<Geometry>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl MediaInspector for FakeInspector {
    async fn classify(&self, path: &Path) -> MediaResult<Geometry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "classified a file that does not exist");
        self.geometry
            .ok_or_else(|| MediaError::ffprobe_failed("probe failed", Some("bad input".into())))
    }
}

/// Optimizer that prefixes the input with a marker, or fails.
pub struct FakeOptimizer {
    pub fail: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl MediaOptimizer for FakeOptimizer {
    async fn fast_start(&self, input: &Path, output: &Path) -> MediaResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MediaError::ffmpeg_failed("remux failed", None, Some(1)));
        }
        let mut data = b"faststart:".to_vec();
        data.extend(tokio::fs::read(input).await?);
        tokio::fs::write(output, data).await?;
        Ok(())
    }
}

/// One recorded `put_file` call.
#[derive(Debug, Clone)]
pub struct Put {
    pub key: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Object store that keeps uploads in memory and signs with a fixed host.
#[derive(Default)]
pub struct RecordingStore {
    pub puts: Mutex<Vec<Put>>,
    pub fail_puts: bool,
}

impl RecordingStore {
    pub fn puts(&self) -> Vec<Put> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    fn bucket(&self) -> &str {
        BUCKET
    }

    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()> {
        if self.fail_puts {
            return Err(StorageError::upload_failed("AccessDenied"));
        }
        let body = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;
        self.puts.lock().unwrap().push(Put {
            key: key.to_string(),
            content_type: content_type.to_string(),
            body,
        });
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "{}/{}/{}?X-Amz-Expires={}",
            SIGNER,
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}

/// Knobs for [`TestApp::with`].
#[derive(Default)]
pub struct Options {
    pub geometry: Option<Geometry>,
    pub probe_fails: bool,
    pub optimize_fails: bool,
    pub put_fails: bool,
    pub production: bool,
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub videos: Arc<InMemoryVideoRepository>,
    pub store: Arc<RecordingStore>,
    pub inspector: Arc<FakeInspector>,
    pub optimizer: Arc<FakeOptimizer>,
    pub staging: TempDir,
    pub assets: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(Options {
            geometry: Some(Geometry::Landscape),
            ..Options::default()
        })
    }

    pub fn with(options: Options) -> Self {
        let staging = tempfile::tempdir().unwrap();
        let assets = tempfile::tempdir().unwrap();

        let config = ApiConfig {
            jwt_secret: JWT_SECRET.to_string(),
            staging_dir: staging.path().to_path_buf(),
            assets_root: assets.path().to_path_buf(),
            public_base_url: "http://localhost:8091".to_string(),
            metrics_enabled: false,
            environment: if options.production {
                "production".to_string()
            } else {
                "development".to_string()
            },
            ..ApiConfig::default()
        };

        let videos = Arc::new(InMemoryVideoRepository::new());
        let store = Arc::new(RecordingStore {
            fail_puts: options.put_fails,
            ..RecordingStore::default()
        });
        let inspector = Arc::new(FakeInspector {
            geometry: if options.probe_fails {
                None
            } else {
                Some(options.geometry.unwrap_or(Geometry::Landscape))
            },
            calls: AtomicUsize::new(0),
        });
        let optimizer = Arc::new(FakeOptimizer {
            fail: options.optimize_fails,
            calls: AtomicUsize::new(0),
        });

        let state = AppState::from_parts(
            config,
            videos.clone(),
            store.clone(),
            inspector.clone(),
            optimizer.clone(),
        );
        let router = create_router(state.clone(), None);

        Self {
            router,
            state,
            videos,
            store,
            inspector,
            optimizer,
            staging,
            assets,
        }
    }

    pub fn token(&self, user: &UserId) -> String {
        self.state
            .auth
            .issue(user, Duration::from_secs(3600))
            .unwrap()
    }

    /// Insert a draft record owned by `owner`.
    pub async fn seed_video(&self, owner: UserId) -> Video {
        let video = Video::new(owner, "Boots", "A pair of boots");
        self.videos.create(&video).await.unwrap();
        video
    }

    pub async fn stored(&self, video: &Video) -> Option<Video> {
        self.videos.get(&video.id).await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    pub fn probe_calls(&self) -> usize {
        self.inspector.calls.load(Ordering::SeqCst)
    }

    pub fn optimize_calls(&self) -> usize {
        self.optimizer.calls.load(Ordering::SeqCst)
    }

    /// Entries left under the staging root.
    pub fn staged_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.staging.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}

/// One multipart file part.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, part.file_name
            )
            .as_bytes(),
        );
        body.extend(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend(part.data);
        body.extend(b"\r\n");
    }
    body.extend(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Multipart POST with an optional bearer token.
pub fn multipart_request(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub fn video_part(data: &[u8]) -> Part<'_> {
    Part {
        name: "video",
        file_name: "boots.mp4",
        content_type: "video/mp4",
        data,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, token: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}
