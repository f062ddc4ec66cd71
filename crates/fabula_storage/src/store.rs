//! File-backed state repository.

use crate::StoryState;
use async_trait::async_trait;
use fabula_error::{FabulaResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Narrow seam over state persistence.
///
/// The orchestrator reads once at the start of a step and writes at most
/// once at the end. Tests substitute [`crate::MemoryStateStore`] here.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Load the persisted record, or a fresh default record if none exists.
    async fn load(&self) -> FabulaResult<StoryState>;

    /// Durably persist the record, replacing any prior value.
    async fn save(&self, state: &StoryState) -> FabulaResult<()>;
}

#[async_trait]
impl<R: StateRepository + ?Sized> StateRepository for std::sync::Arc<R> {
    async fn load(&self) -> FabulaResult<StoryState> {
        (**self).load().await
    }

    async fn save(&self, state: &StoryState) -> FabulaResult<()> {
        (**self).save(state).await
    }
}

/// JSON file backend for the story record.
///
/// The record lives at a fixed path as pretty-printed JSON so operators can
/// inspect it directly. Writes go to a temp file first, then rename, so an
/// aborted step cannot leave a half-written record behind.
pub struct FileStateStore {
    path: PathBuf,
    dry_run: bool,
}

impl FileStateStore {
    /// Create a store for the given state file path.
    ///
    /// With `dry_run` set, `save` becomes a no-op and the persisted value is
    /// left unchanged.
    pub fn new(path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            path: path.into(),
            dry_run,
        }
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateRepository for FileStateStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> FabulaResult<StoryState> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("No state file found, starting from a fresh record");
            return Ok(StoryState::default());
        }

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let state: StoryState = serde_json::from_str(&contents)
            .map_err(|e| StorageError::new(StorageErrorKind::Corrupt(e.to_string())))?;

        debug!(
            story_len = state.text.len(),
            finished = state.finished,
            "Loaded story state"
        );
        Ok(state)
    }

    #[tracing::instrument(skip(self, state), fields(path = %self.path.display(), story_len = state.text.len()))]
    async fn save(&self, state: &StoryState) -> FabulaResult<()> {
        if self.dry_run {
            info!("Dry run: state not saved");
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let contents = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialize(e.to_string())))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, contents).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        info!(finished = state.finished, "Saved story state");
        Ok(())
    }
}
