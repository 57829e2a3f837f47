use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{validate_object_path, MediaStorage, StorageError, MEDIA_BUCKET};
use crate::settings::AppConfig;

/// Media bucket backed by a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalMediaStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        LocalMediaStorage {
            root: root.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.media_root.join(MEDIA_BUCKET), config.media_public_prefix())
    }

    /// Bucket directory state for the health report. The directory is
    /// created on the first upload, so a missing one is not an error.
    pub async fn status(&self) -> &'static str {
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => "OK",
            Ok(_) => "Unavailable",
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => "Empty",
            Err(e) => {
                tracing::warn!(root = %self.root.display(), "Media storage check failed: {}", e);
                "Unavailable"
            }
        }
    }

    fn resolve(&self, object_path: &str) -> Result<PathBuf, StorageError> {
        validate_object_path(object_path)?;
        Ok(self.root.join(object_path))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn put(&self, object_path: &str, source: &Path) -> Result<(), StorageError> {
        let target = self.resolve(object_path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(source, &target).await?;
        tracing::debug!(path = %target.display(), "Stored media object");
        Ok(())
    }

    async fn read(&self, object_path: &str) -> Result<Vec<u8>, StorageError> {
        let target = self.resolve(object_path)?;
        match fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(object_path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, object_path: &str) -> Result<(), StorageError> {
        let target = self.resolve(object_path)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(object_path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, object_path: &str) -> String {
        format!("{}/{}", self.public_prefix, object_path)
    }
}
