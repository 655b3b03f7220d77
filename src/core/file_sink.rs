//! Destination for downloaded payloads
//!
//! The payload is first written to a hidden temporary file next to the target
//! and renamed into place, so a half-written file never carries the final name.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::models::{AppError, AppResult};
use crate::utils::file_utils::sanitize_filename;

#[async_trait]
pub trait FileSink: Send + Sync {
    /// Store `bytes` under `file_name` and report where it ended up
    async fn save(&self, file_name: &str, bytes: Bytes) -> AppResult<PathBuf>;
}

/// Writes downloads into a fixed directory
#[derive(Debug, Clone)]
pub struct DirectoryFileSink {
    directory: PathBuf,
}

impl DirectoryFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl FileSink for DirectoryFileSink {
    async fn save(&self, file_name: &str, bytes: Bytes) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create output directory {}: {}",
                    self.directory.display(),
                    e
                ))
            })?;

        let target = self.directory.join(sanitize_filename(file_name));
        let temp = self
            .directory
            .join(format!(".{}.part", Uuid::new_v4().simple()));

        debug!("Writing {} bytes to {}", bytes.len(), temp.display());
        let mut file = tokio::fs::File::create(&temp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        if let Err(err) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(err.into());
        }

        info!("Saved {}", target.display());
        Ok(target)
    }
}

/// Keeps saved files in memory instead of writing them out
#[derive(Debug, Default)]
pub struct MemoryFileSink {
    files: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryFileSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<(String, Bytes)> {
        self.files.lock().clone()
    }
}

#[async_trait]
impl FileSink for MemoryFileSink {
    async fn save(&self, file_name: &str, bytes: Bytes) -> AppResult<PathBuf> {
        self.files.lock().push((file_name.to_string(), bytes));
        Ok(PathBuf::from(file_name))
    }
}
