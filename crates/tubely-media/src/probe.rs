//! FFprobe aspect classification.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use tubely_models::Geometry;

use crate::error::{MediaError, MediaResult};

/// Classifies the screen geometry of a local media file.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    async fn classify(&self, path: &Path) -> MediaResult<Geometry>;
}

/// Frame size of the first stream reporting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// [`MediaInspector`] backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeInspector {
    binary: PathBuf,
}

impl Default for FfprobeInspector {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeInspector {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Probe a file for the dimensions of its first sized stream.
    pub async fn probe_dimensions(&self, path: &Path) -> MediaResult<VideoDimensions> {
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let program = which::which(&self.binary)
            .map_err(|_| MediaError::FfprobeNotFound(self.binary.clone()))?;

        let started = Instant::now();
        let output = Command::new(program)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        metrics::histogram!("tubely_media_tool_duration_seconds", "tool" => "ffprobe")
            .record(started.elapsed().as_secs_f64());

        if !output.status.success() {
            return Err(MediaError::ffprobe_failed(
                format!("FFprobe exited with status {}", output.status),
                Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            ));
        }

        parse_dimensions(&output.stdout)
    }
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    async fn classify(&self, path: &Path) -> MediaResult<Geometry> {
        let dims = self.probe_dimensions(path).await?;
        let geometry = Geometry::from_dimensions(dims.width, dims.height)
            .ok_or_else(|| MediaError::invalid_video("zero frame dimension"))?;

        debug!(
            path = %path.display(),
            width = dims.width,
            height = dims.height,
            aspect = geometry.ratio_label(),
            "Classified video"
        );
        Ok(geometry)
    }
}

/// Parse `ffprobe -show_streams -print_format json` output.
fn parse_dimensions(stdout: &[u8]) -> MediaResult<VideoDimensions> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    if probe.streams.is_empty() {
        return Err(MediaError::invalid_video("No streams found"));
    }

    probe
        .streams
        .iter()
        .find_map(|s| match (s.width, s.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => {
                Some(VideoDimensions { width, height })
            }
            _ => None,
        })
        .ok_or_else(|| MediaError::invalid_video("No stream reports valid dimensions"))
}
