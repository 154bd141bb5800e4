//! FFprobe/FFmpeg CLI wrappers for the upload pipeline.
//!
//! This crate provides:
//! - Aspect classification of a local file via `ffprobe`
//! - Fast-start remuxing via `ffmpeg` (no re-encode)
//! - Type-safe FFmpeg command building with timeout handling
//! - Per-request staging of uploaded bytes on local disk

pub mod command;
pub mod config;
pub mod error;
pub mod faststart;
pub mod probe;
pub mod staging;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use config::MediaToolsConfig;
pub use error::{MediaError, MediaResult};
pub use faststart::{FfmpegOptimizer, MediaOptimizer};
pub use probe::{FfprobeInspector, MediaInspector, VideoDimensions};
pub use staging::{StagedFile, StagingArea};
