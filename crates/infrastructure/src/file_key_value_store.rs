//! Key-value substrate backed by one JSON file per key.
//!
//! Values are written to a temporary sibling and renamed into place, so a
//! reader never sees a half-written collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use auditdesk_application::KeyValueStore;
use auditdesk_core::{AppError, AppResult};
use tracing::debug;

/// File-backed key-value substrate rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store, creating the data directory when missing.
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to create data directory '{}': {error}",
                root.display()
            ))
        })?;

        debug!(root = %root.display(), "opened file key-value store");
        Ok(Self { root })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || matches!(character, '_' | '-'));
        if !valid {
            return Err(AppError::Validation(format!(
                "storage key '{key}' is not a plain name"
            )));
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(AppError::Internal(format!(
                "failed to read '{}': {error}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");

        tokio::fs::write(&staging, value).await.map_err(|error| {
            AppError::Internal(format!("failed to write '{}': {error}", staging.display()))
        })?;
        tokio::fs::rename(&staging, &path).await.map_err(|error| {
            AppError::Internal(format!("failed to replace '{}': {error}", path.display()))
        })
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to remove '{}': {error}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests;
