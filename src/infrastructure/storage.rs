use std::path::Path;

use async_trait::async_trait;
use derive_more::Display;

use crate::errors::AppError;

pub mod local;

/// Bucket name media objects are stored under.
pub const MEDIA_BUCKET: &str = "media";

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("Invalid object path: {_0}")]
    InvalidPath(String),

    #[display("Object not found: {_0}")]
    NotFound(String),

    #[display("Storage I/O error: {_0}")]
    Io(std::io::Error),
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidPath(path) => AppError::InvalidInput(format!("Invalid object path: {}", path)),
            StorageError::NotFound(path) => AppError::NotFound(format!("File {} not found", path)),
            StorageError::Io(e) => AppError::InternalError(format!("Storage error: {}", e)),
        }
    }
}

/// Object storage for uploaded media files.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Copies the file at `source` into the bucket under `object_path`.
    async fn put(&self, object_path: &str, source: &Path) -> Result<(), StorageError>;

    async fn read(&self, object_path: &str) -> Result<Vec<u8>, StorageError>;

    async fn remove(&self, object_path: &str) -> Result<(), StorageError>;

    /// Public URL for an object path.
    fn public_url(&self, object_path: &str) -> String;
}

/// Recovers the object path from a public URL: everything after `/media/`.
pub fn object_path_from_url(public_url: &str) -> Option<&str> {
    public_url
        .split_once("/media/")
        .map(|(_, path)| path)
        .filter(|path| !path.is_empty())
}

/// Rejects absolute paths and any `..` or empty segment.
pub fn validate_object_path(object_path: &str) -> Result<(), StorageError> {
    let valid = !object_path.is_empty()
        && !object_path.starts_with('/')
        && object_path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(object_path.to_string()))
    }
}
