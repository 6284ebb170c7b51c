//! In-memory repository implementation

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::RepositoryResult;
use crate::traits::*;

/// In-memory repository
///
/// Records live only as long as the repository value.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RwLock<Vec<Record>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `records` as-is
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordRepository for MemoryRepository {
    async fn save(&self, record: Record) -> RepositoryResult<Record> {
        let mut records = self.records.write().await;
        Ok(insert_record(&mut records, record))
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Record>> {
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| record_id(r) == Some(id)).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        let mut records = self.records.write().await;
        Ok(remove_record(&mut records, id))
    }

    async fn update_by_id(&self, id: &str, record: Record) -> RepositoryResult<Option<Record>> {
        let mut records = self.records.write().await;
        Ok(replace_record(&mut records, id, record))
    }
}
