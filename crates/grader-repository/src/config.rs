//! Repository configuration types
//!
//! This module selects the storage backend for exam records.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::RepositoryResult;
use crate::file_system::JsonFileRepository;
use crate::memory::MemoryRepository;
use crate::traits::RecordRepository;

/// Default location of the JSON record store
pub const DEFAULT_STORAGE_PATH: &str = "data/storage.json";

/// Repository source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// One JSON file on disk
    File,
    /// In-process records, lost on restart
    Memory,
}

/// Storage configuration
///
/// # Examples
///
/// ```rust
/// use grader_repository::{RepositorySource, StorageConfig};
///
/// let config = StorageConfig::file("data/storage.json");
/// assert_eq!(config.source(), RepositorySource::File);
///
/// let config = StorageConfig::memory();
/// assert_eq!(config.source(), RepositorySource::Memory);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    File {
        #[serde(default = "default_storage_path")]
        path: PathBuf,
    },
    Memory,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::File {
            path: default_storage_path(),
        }
    }
}

impl StorageConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn memory() -> Self {
        Self::Memory
    }

    pub fn source(&self) -> RepositorySource {
        match self {
            Self::File { .. } => RepositorySource::File,
            Self::Memory => RepositorySource::Memory,
        }
    }

    /// Open the configured backend
    pub async fn open(&self) -> RepositoryResult<Arc<dyn RecordRepository>> {
        match self {
            Self::File { path } => {
                tracing::info!("Using JSON file record store: {}", path.display());
                Ok(Arc::new(JsonFileRepository::open(path).await?))
            }
            Self::Memory => {
                tracing::info!("Using in-memory record store");
                Ok(Arc::new(MemoryRepository::new()))
            }
        }
    }
}
