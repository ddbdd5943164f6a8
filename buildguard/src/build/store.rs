//! Saved-build persistence
//!
//! The storefront keeps "the last saved build" so a user can come back to
//! it. Stores are injected by the caller; nothing in the engine reaches for
//! ambient state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

use super::Build;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuild {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub build: Build,
}

impl SavedBuild {
    pub fn new(build: Build) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            build,
        }
    }
}

/// Holds the most recently saved build. Each `save` replaces the previous one.
pub trait BuildStore: Send + Sync {
    fn save(&self, build: &Build) -> Result<SavedBuild>;
    fn load(&self) -> Result<Option<SavedBuild>>;
}

#[derive(Debug, Default)]
pub struct MemoryBuildStore {
    last: Mutex<Option<SavedBuild>>,
}

impl MemoryBuildStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildStore for MemoryBuildStore {
    fn save(&self, build: &Build) -> Result<SavedBuild> {
        let saved = SavedBuild::new(build.clone());
        let mut last = self
            .last
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        *last = Some(saved.clone());
        Ok(saved)
    }

    fn load(&self) -> Result<Option<SavedBuild>> {
        let last = self
            .last
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(last.clone())
    }
}

/// Persists the last saved build as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileBuildStore {
    path: PathBuf,
}

impl JsonFileBuildStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BuildStore for JsonFileBuildStore {
    fn save(&self, build: &Build) -> Result<SavedBuild> {
        let saved = SavedBuild::new(build.clone());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&saved)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("Saved build {} to {}", saved.id, self.path.display());
        Ok(saved)
    }

    fn load(&self) -> Result<Option<SavedBuild>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
