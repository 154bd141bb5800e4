//! Fast-start remux.
//!
//! Moves the MP4 index (`moov` atom) ahead of the media data so playback can
//! begin before the whole file is downloaded. Streams are copied, never
//! re-encoded.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::config::MediaToolsConfig;
use crate::error::{MediaError, MediaResult};

/// Produces a streaming-optimized copy of a local media file.
#[async_trait]
pub trait MediaOptimizer: Send + Sync {
    /// Write a fast-start copy of `input` to `output`.
    ///
    /// `output` is chosen by the caller and must differ from `input`.
    async fn fast_start(&self, input: &Path, output: &Path) -> MediaResult<()>;
}

/// [`MediaOptimizer`] backed by the `ffmpeg` CLI.
#[derive(Debug, Clone)]
pub struct FfmpegOptimizer {
    runner: FfmpegRunner,
}

impl Default for FfmpegOptimizer {
    fn default() -> Self {
        Self::from_config(&MediaToolsConfig::default())
    }
}

impl FfmpegOptimizer {
    pub fn new(runner: FfmpegRunner) -> Self {
        Self { runner }
    }

    pub fn from_config(config: &MediaToolsConfig) -> Self {
        Self::new(
            FfmpegRunner::new(config.ffmpeg_path.clone()).with_timeout(config.ffmpeg_timeout_secs),
        )
    }

    fn command(input: &Path, output: &Path) -> FfmpegCommand {
        FfmpegCommand::new(input, output)
            .stream_copy()
            .movflags("faststart")
            .format("mp4")
    }
}

#[async_trait]
impl MediaOptimizer for FfmpegOptimizer {
    async fn fast_start(&self, input: &Path, output: &Path) -> MediaResult<()> {
        if !input.exists() {
            return Err(MediaError::FileNotFound(input.to_path_buf()));
        }
        if input == output {
            return Err(MediaError::internal("fast start output must differ from input"));
        }

        self.runner.run(&Self::command(input, output)).await?;

        let size = output_size(output).await?;
        debug!(output = %output.display(), size, "Fast start remux complete");
        info!("Optimized {} for streaming", input.display());
        Ok(())
    }
}

/// Size of a produced file, treating a missing or empty file as no output.
async fn output_size(path: &Path) -> MediaResult<u64> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.len() > 0 => Ok(meta.len()),
        Ok(_) => Err(MediaError::MissingOutput(PathBuf::from(path))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(MediaError::MissingOutput(PathBuf::from(path)))
        }
        Err(e) => Err(e.into()),
    }
}
