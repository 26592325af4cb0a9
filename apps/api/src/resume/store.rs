//! Persistence for the single resume document.
//!
//! The first `load` seeds an empty resume so callers always get a document back.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::resume::models::{ResumeData, StoredResume};

const RESUME_FILE: &str = "resume.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt resume document: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn load(&self) -> Result<StoredResume, StoreError>;

    async fn save(&self, resume: ResumeData) -> Result<StoredResume, StoreError>;
}

/// Stores the resume as one JSON file under the data directory.
pub struct FileResumeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileResumeStore {
    /// Opens the store, creating `dir` if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        Ok(Self {
            path: dir.join(RESUME_FILE),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes to a sibling temp file, then renames over the target.
    async fn write(&self, stored: &StoredResume) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(stored)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ResumeStore for FileResumeStore {
    async fn load(&self) -> Result<StoredResume, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let _guard = self.write_lock.lock().await;
                // Another writer may have seeded while we waited.
                if let Ok(bytes) = tokio::fs::read(&self.path).await {
                    return Ok(serde_json::from_slice(&bytes)?);
                }
                let seeded = StoredResume::new(ResumeData::default());
                self.write(&seeded).await?;
                info!(path = %self.path.display(), "Seeded empty resume document");
                Ok(seeded)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, resume: ResumeData) -> Result<StoredResume, StoreError> {
        let stored = StoredResume::new(resume);
        let _guard = self.write_lock.lock().await;
        self.write(&stored).await?;
        Ok(stored)
    }
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryResumeStore {
    inner: RwLock<Option<StoredResume>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn load(&self) -> Result<StoredResume, StoreError> {
        if let Some(stored) = self.inner.read().await.as_ref() {
            return Ok(stored.clone());
        }
        let mut slot = self.inner.write().await;
        Ok(slot
            .get_or_insert_with(|| StoredResume::new(ResumeData::default()))
            .clone())
    }

    async fn save(&self, resume: ResumeData) -> Result<StoredResume, StoreError> {
        let stored = StoredResume::new(resume);
        *self.inner.write().await = Some(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::ResumeProfile;

    fn named(name: &str) -> ResumeData {
        ResumeData {
            profile: ResumeProfile {
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_file_store_seeds_empty_resume() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResumeStore::open(dir.path()).await.unwrap();

        let first = store.load().await.unwrap();
        assert_eq!(first.resume, ResumeData::default());
        assert!(store.path().exists());

        let second = store.load().await.unwrap();
        assert_eq!(second.saved_at, first.saved_at);
    }

    #[tokio::test]
    async fn test_file_store_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileResumeStore::open(dir.path()).await.unwrap();
            store.save(named("Jane Doe")).await.unwrap();
        }

        let reopened = FileResumeStore::open(dir.path()).await.unwrap();
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.resume.profile.name, "Jane Doe");
        assert!(!dir.path().join("resume.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_creates_nested_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileResumeStore::open(&nested).await.unwrap();
        store.save(named("Jane Doe")).await.unwrap();
        assert!(nested.join("resume.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_reports_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resume.json"), b"{not json").unwrap();
        let store = FileResumeStore::open(dir.path()).await.unwrap();
        assert!(matches!(store.load().await, Err(StoreError::Serde(_))));
    }

    #[tokio::test]
    async fn test_memory_store_seeds_then_saves() {
        let store = MemoryResumeStore::new();
        assert_eq!(store.load().await.unwrap().resume, ResumeData::default());

        store.save(named("Jane Doe")).await.unwrap();
        assert_eq!(store.load().await.unwrap().resume.profile.name, "Jane Doe");
    }
}
