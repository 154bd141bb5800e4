//! Per-request staging of uploaded bytes on local disk.
//!
//! Every request gets its own temporary directory under the staging root.
//! The directory and everything written into it (the original upload and
//! any derived files) are removed when the [`StagedFile`] is dropped, on
//! success, on early return and on unwind alike.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

const STAGING_PREFIX: &str = "tubely-upload-";

/// Root directory under which per-request staging directories are created.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl Default for StagingArea {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a fresh staging directory holding an empty file named `file_name`.
    pub async fn stage(&self, file_name: &str) -> MediaResult<StagedFile> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == ".." {
            return Err(MediaError::internal(format!(
                "invalid staging file name: {:?}",
                file_name
            )));
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.root)?;
        let path = dir.path().join(file_name);
        let file = File::create(&path).await?;

        debug!(path = %path.display(), "Staged upload file created");

        Ok(StagedFile {
            dir,
            path,
            file: Some(file),
            size: 0,
        })
    }
}

/// An uploaded file on local disk, exclusively owned by one request.
#[derive(Debug)]
pub struct StagedFile {
    dir: TempDir,
    path: PathBuf,
    file: Option<File>,
    size: u64,
}

impl StagedFile {
    /// Append bytes to the staged file.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> MediaResult<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| MediaError::internal("staged file already sealed"))?;
        file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush and close the write handle. Further writes fail.
    pub async fn seal(&mut self) -> MediaResult<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written so far.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Path for a sibling file inside the same staging directory.
    pub fn derived_path(&self, suffix: &str) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.dir.path().join(format!("{}.{}", name, suffix))
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        debug!(dir = %self.dir.path().display(), "Removing staging directory");
    }
}
