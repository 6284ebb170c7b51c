//! Core trait definition for record storage
//!
//! [`RecordRepository`] is the single seam between the HTTP layer and the
//! storage backends. Every backend stores the same thing: opaque JSON object
//! maps keyed by a string `id` the store assigns.
//!
//! # Example
//!
//! ```no_run
//! use grader_repository::{MemoryRepository, RecordRepository};
//! use serde_json::{json, Map};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let repo = MemoryRepository::new();
//!
//! let mut record = Map::new();
//! record.insert("AP1".to_string(), json!(90));
//! let saved = repo.save(record).await?;
//! let id = saved["id"].as_str().unwrap_or_default();
//!
//! assert!(repo.get_by_id(id).await?.is_some());
//! assert!(repo.delete_by_id(id).await?);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::RepositoryResult;

/// A stored exam record
pub type Record = Map<String, Value>;

/// Field holding the store-assigned record id
pub const ID_FIELD: &str = "id";

/// Generate a fresh record id (UUID v4)
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Id of a stored record, if it carries one
pub fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// Storage interface for exam records
///
/// # Implementation Notes
///
/// - `save` always assigns a fresh id, replacing any `id` the caller sent
/// - `update_by_id` replaces the whole record but keeps the stored id
/// - Missing records are `None` / `false`, never errors
/// - Records keep their insertion order in `load_all`
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Store a new record and return it with its assigned id
    async fn save(&self, record: Record) -> RepositoryResult<Record>;

    /// Load every stored record
    async fn load_all(&self) -> RepositoryResult<Vec<Record>>;

    /// Load one record by id
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Record>>;

    /// Delete one record by id. Returns whether a record was removed.
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<bool>;

    /// Replace the record with the given id, keeping the id
    async fn update_by_id(&self, id: &str, record: Record) -> RepositoryResult<Option<Record>>;
}

/// Apply a save to an in-memory record list
pub(crate) fn insert_record(records: &mut Vec<Record>, mut record: Record) -> Record {
    record.insert(ID_FIELD.to_string(), Value::String(new_record_id()));
    records.push(record.clone());
    record
}

/// Apply an update to an in-memory record list
pub(crate) fn replace_record(
    records: &mut [Record],
    id: &str,
    mut record: Record,
) -> Option<Record> {
    let slot = records.iter_mut().find(|r| record_id(r) == Some(id))?;
    record.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    *slot = record.clone();
    Some(record)
}

/// Apply a delete to an in-memory record list
pub(crate) fn remove_record(records: &mut Vec<Record>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| record_id(r) != Some(id));
    records.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_insert_overwrites_client_id() {
        let mut records = Vec::new();
        let saved = insert_record(&mut records, record(json!({"id": "mine", "AP1": 50})));
        let id = record_id(&saved).unwrap();
        assert_ne!(id, "mine");
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert_eq!(records, vec![saved.clone()]);
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut records = vec![record(json!({"id": "a", "AP1": 50}))];
        let updated =
            replace_record(&mut records, "a", record(json!({"id": "b", "AP1": 60}))).unwrap();
        assert_eq!(updated, record(json!({"id": "a", "AP1": 60})));
        assert_eq!(records[0], updated);

        assert!(replace_record(&mut records, "missing", Record::new()).is_none());
    }

    #[test]
    fn test_remove() {
        let mut records = vec![record(json!({"id": "a"})), record(json!({"id": "b"}))];
        assert!(remove_record(&mut records, "a"));
        assert!(!remove_record(&mut records, "a"));
        assert_eq!(records.len(), 1);
    }
}
