//! Record storage for the exam grader
//!
//! This crate provides one interface for persisting exam records across
//! storage backends. Records are opaque JSON objects; the store owns the `id`
//! field, assigning a UUID v4 on save and preserving it on update.
//!
//! # Backends
//!
//! - **JSON file**: all records in one pretty-printed JSON array on disk
//! - **Memory**: in-process store for tests and throwaway servers
//!
//! # Quick Start
//!
//! ```no_run
//! use grader_repository::{JsonFileRepository, RecordRepository};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = JsonFileRepository::open("data/storage.json").await?;
//!
//!     let record = json!({"Name": "Anna", "AP1": 90});
//!     let saved = repo.save(record.as_object().cloned().unwrap_or_default()).await?;
//!     println!("Saved record {}", saved["id"]);
//!
//!     for record in repo.load_all().await? {
//!         println!("{}", serde_json::Value::Object(record));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Selecting a backend from configuration
//!
//! ```no_run
//! use grader_repository::StorageConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StorageConfig::file("data/storage.json");
//!     let repo = config.open().await?;
//!     println!("{} records", repo.load_all().await?.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod traits;

// Re-exports - Configuration
pub use config::{RepositorySource, StorageConfig};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Repositories
pub use file_system::JsonFileRepository;
pub use memory::MemoryRepository;
pub use traits::*;
