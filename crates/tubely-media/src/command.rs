//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
        }
    }

    /// Add an output argument (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Copy every stream without re-encoding.
    pub fn stream_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Set MOV/MP4 muxer flags.
    pub fn movflags(self, flags: impl Into<String>) -> Self {
        self.output_arg("-movflags").output_arg(flags)
    }

    /// Force the output container format.
    pub fn format(self, format: impl Into<String>) -> Self {
        self.output_arg("-f").output_arg(format)
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push("error".to_string());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands with a wall-clock timeout.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    /// FFmpeg binary
    binary: PathBuf,
    /// Timeout in seconds
    timeout_secs: Option<u64>,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegRunner {
    /// Create a new runner for the given binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout_secs: None,
        }
    }

    /// Set timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Run an FFmpeg command to completion.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        let program = which::which(&self.binary)
            .map_err(|_| MediaError::FfmpegNotFound(self.binary.clone()))?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: {} {}", program.display(), args.join(" "));

        let started = Instant::now();
        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| MediaError::internal("FFmpeg stderr not captured"))?;

        let stderr_handle = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf).await;
            buf
        });

        let result = self.wait_for_completion(&mut child).await;
        let stderr = stderr_handle.await.unwrap_or_default();

        metrics::histogram!("tubely_media_tool_duration_seconds", "tool" => "ffmpeg")
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(MediaError::ffmpeg_failed(
                format!("FFmpeg exited with status {}", status),
                Some(stderr.trim().to_string()),
                status.code(),
            )),
            Err(e) => Err(e),
        }
    }

    async fn wait_for_completion(&self, child: &mut Child) -> MediaResult<std::process::ExitStatus> {
        let Some(timeout_secs) = self.timeout_secs else {
            return Ok(child.wait().await?);
        };

        match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait()).await {
            Ok(status) => Ok(status?),
            Err(_) => {
                warn!("FFmpeg timed out after {} seconds, killing process", timeout_secs);
                let _ = child.kill().await;
                Err(MediaError::Timeout(timeout_secs))
            }
        }
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg(binary: &Path) -> MediaResult<PathBuf> {
    which::which(binary).map_err(|_| MediaError::FfmpegNotFound(binary.to_path_buf()))
}

/// Check if FFprobe is available.
pub fn check_ffprobe(binary: &Path) -> MediaResult<PathBuf> {
    which::which(binary).map_err(|_| MediaError::FfprobeNotFound(binary.to_path_buf()))
}
