//! Local filesystem storage implementation.
//!
//! The collection is stored as a pretty-printed JSON array. Writes go to a
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous collection intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::JobAd;
use crate::storage::SavedJobsStorage;

/// Default key of the saved jobs collection.
pub const SAVED_JOBS_KEY: &str = "saved_jobs.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    key: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_key(root_dir, SAVED_JOBS_KEY)
    }

    /// Create a LocalStorage storing the collection under a custom key.
    pub fn with_key(root_dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            key: key.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Full path of the saved jobs file.
    pub fn saved_jobs_path(&self) -> PathBuf {
        self.path(&self.key)
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SavedJobsStorage for LocalStorage {
    async fn load(&self) -> Result<Vec<JobAd>> {
        match self.read_json(&self.key).await? {
            Some(jobs) => Ok(jobs),
            None => {
                log::debug!("No {} found, starting empty", self.key);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, jobs: &[JobAd]) -> Result<()> {
        self.write_json(&self.key, jobs).await?;
        log::debug!("{} saved jobs written to {}", jobs.len(), self.key);
        Ok(())
    }
}
