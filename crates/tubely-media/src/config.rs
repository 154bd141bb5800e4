//! External tool configuration.

use std::path::PathBuf;

/// Default remux timeout. Fast start copies streams, so this only trips on a wedged process.
pub const DEFAULT_FFMPEG_TIMEOUT_SECS: u64 = 600;

/// Locations and limits of the external media tools.
#[derive(Debug, Clone)]
pub struct MediaToolsConfig {
    /// FFprobe binary (name on PATH or absolute path)
    pub ffprobe_path: PathBuf,
    /// FFmpeg binary (name on PATH or absolute path)
    pub ffmpeg_path: PathBuf,
    /// Kill FFmpeg after this many seconds
    pub ffmpeg_timeout_secs: u64,
}

impl Default for MediaToolsConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffmpeg_timeout_secs: DEFAULT_FFMPEG_TIMEOUT_SECS,
        }
    }
}

impl MediaToolsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ffprobe_path: std::env::var("FFPROBE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffprobe")),
            ffmpeg_path: std::env::var("FFMPEG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffmpeg")),
            ffmpeg_timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FFMPEG_TIMEOUT_SECS),
        }
    }
}
