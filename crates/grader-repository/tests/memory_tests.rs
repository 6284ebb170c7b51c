//! Integration tests for MemoryRepository and backend selection

use grader_repository::{
    MemoryRepository, Record, RecordRepository, RepositorySource, StorageConfig,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_memory_crud() {
    let repo = MemoryRepository::new();
    assert!(repo.load_all().await.unwrap().is_empty());

    let saved = repo.save(record(json!({"AP1": 90}))).await.unwrap();
    let id = saved["id"].as_str().unwrap().to_string();
    assert_eq!(repo.get_by_id(&id).await.unwrap(), Some(saved));

    let updated = repo
        .update_by_id(&id, record(json!({"AP1": 91})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["AP1"], json!(91));

    assert!(repo.delete_by_id(&id).await.unwrap());
    assert!(!repo.delete_by_id(&id).await.unwrap());
    assert!(repo.get_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_memory_with_records() {
    let repo = MemoryRepository::with_records(vec![record(json!({"id": "fixed", "AP1": 30}))]);
    let found = repo.get_by_id("fixed").await.unwrap().unwrap();
    assert_eq!(found["AP1"], json!(30));
}

#[tokio::test]
async fn test_storage_config_opens_memory_backend() {
    let config = StorageConfig::memory();
    assert_eq!(config.source(), RepositorySource::Memory);

    let repo = config.open().await.unwrap();
    repo.save(record(json!({"AP1": 1}))).await.unwrap();
    assert_eq!(repo.load_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_storage_config_opens_file_backend() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("records/storage.json");

    let repo = StorageConfig::file(&path).open().await.unwrap();
    repo.save(record(json!({"AP1": 1}))).await.unwrap();

    assert!(path.exists());
    let reopened = StorageConfig::file(&path).open().await.unwrap();
    assert_eq!(reopened.load_all().await.unwrap().len(), 1);
}
