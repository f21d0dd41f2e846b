//! Local-file directory source.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::directory::{Directory, DirectoryError, DirectoryProvider};

/// Directory source backed by a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileDirectoryProvider {
    path: PathBuf,
}

impl FileDirectoryProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DirectoryProvider for FileDirectoryProvider {
    async fn load(&self) -> Result<Directory, DirectoryError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(DirectoryError::Io)?;

        serde_json::from_str(&body).map_err(DirectoryError::Parse)
    }
}
