//! Integration tests for the migration executor.
//!
//! These tests use the real MigrationExecutor but mock the relational and
//! document stores, so no database is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use hackathon_migration::{MigrationError, MigrationExecutor};
use hackathon_repository::{
    seed_dataset, DatasetRepository, DocumentStore, DocumentStoreError, RepositoryError,
    WorkshopRemoval,
};
use hackathon_shared::analytics::WorkshopAnalyticsRow;
use hackathon_shared::{
    Creates, DocumentSet, DocumentStoreStats, EmbeddedWorkshop, EventDocument,
    EventWorkshopCount, IndexInfo, RelationalDataset, TableCounts, WorkshopChanges,
    WorkshopDetails,
};

// Mock relational store serving a fixed dataset
struct MockDatasetRepository {
    dataset: RelationalDataset,
    should_error: bool,
}

impl MockDatasetRepository {
    fn new(dataset: RelationalDataset) -> Self {
        Self {
            dataset,
            should_error: false,
        }
    }

    fn failing() -> Self {
        Self {
            dataset: RelationalDataset::default(),
            should_error: true,
        }
    }
}

#[async_trait]
impl DatasetRepository for MockDatasetRepository {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn load_dataset(&self) -> Result<RelationalDataset, RepositoryError> {
        if self.should_error {
            return Err(RepositoryError::invalid_data("Mock read error"));
        }
        Ok(self.dataset.clone())
    }

    async fn replace_dataset(
        &self,
        dataset: &RelationalDataset,
    ) -> Result<TableCounts, RepositoryError> {
        Ok(dataset.table_counts())
    }

    async fn table_counts(&self) -> Result<TableCounts, RepositoryError> {
        Ok(self.dataset.table_counts())
    }
}

// Mock document store recording every replace call
struct MockDocumentStore {
    written: Mutex<Vec<DocumentSet>>,
}

impl MockDocumentStore {
    fn new() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
        }
    }

    fn replace_count(&self) -> usize {
        self.written.lock().unwrap().len()
    }

    fn last_written(&self) -> Option<DocumentSet> {
        self.written.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    async fn replace_collections(&self, documents: &DocumentSet) -> Result<(), DocumentStoreError> {
        self.written.lock().unwrap().push(documents.clone());
        Ok(())
    }

    async fn stats(&self) -> Result<DocumentStoreStats, DocumentStoreError> {
        Ok(DocumentStoreStats::default())
    }

    async fn find_event(&self, _event_id: i32) -> Result<Option<EventDocument>, DocumentStoreError> {
        Ok(None)
    }

    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn push_workshop(
        &self,
        _event_id: i32,
        _workshop: &EmbeddedWorkshop,
    ) -> Result<bool, DocumentStoreError> {
        Ok(false)
    }

    async fn update_workshop(
        &self,
        _event_id: i32,
        _workshop_number: i32,
        _changes: &WorkshopChanges,
    ) -> Result<bool, DocumentStoreError> {
        Ok(false)
    }

    async fn pull_workshop(
        &self,
        _event_id: i32,
        _workshop_number: i32,
    ) -> Result<WorkshopRemoval, DocumentStoreError> {
        Ok(WorkshopRemoval::EventNotFound)
    }

    async fn create_indexes(&self) -> Result<Vec<String>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn workshop_analytics(
        &self,
        _skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn explain_workshop_analytics(
        &self,
        _skill_level: Option<&str>,
    ) -> Result<serde_json::Value, DocumentStoreError> {
        Ok(serde_json::Value::Null)
    }
}

fn seed() -> RelationalDataset {
    seed_dataset(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
}

#[tokio::test]
async fn test_migration_writes_one_document_per_root_row() {
    let dataset = seed();
    let store = Arc::new(MockDocumentStore::new());
    let executor = MigrationExecutor::new(
        Arc::new(MockDatasetRepository::new(dataset.clone())),
        store.clone(),
    );

    let stats = executor.execute().await.unwrap();

    assert_eq!(stats.participants, dataset.participants.len());
    assert_eq!(stats.events, dataset.events.len());
    assert_eq!(stats.submissions, dataset.submissions.len());
    assert_eq!(stats.warnings_reg_missing_event, 0);
    assert_eq!(stats.warnings_creates_missing_person, 0);

    let written = store.last_written().unwrap();
    let embedded_workshops: usize = written.events.iter().map(|e| e.workshops.len()).sum();
    assert_eq!(embedded_workshops, dataset.workshops.len());
}

#[tokio::test]
async fn test_repeated_migration_yields_identical_counts() {
    let store = Arc::new(MockDocumentStore::new());
    let executor =
        MigrationExecutor::new(Arc::new(MockDatasetRepository::new(seed())), store.clone());

    let first = executor.execute().await.unwrap();
    let second = executor.execute().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.replace_count(), 2);
}

#[tokio::test]
async fn test_relational_failure_leaves_document_store_untouched() {
    let store = Arc::new(MockDocumentStore::new());
    let executor = MigrationExecutor::new(Arc::new(MockDatasetRepository::failing()), store.clone());

    let result = executor.execute().await;

    assert!(matches!(result, Err(MigrationError::Repository(_))));
    assert_eq!(store.replace_count(), 0);
}

#[tokio::test]
async fn test_dangling_references_are_reported_not_fatal() {
    let mut dataset = seed();
    dataset.creates.push(Creates {
        person_id: 1,
        submission_id: 999,
    });
    let store = Arc::new(MockDocumentStore::new());
    let executor =
        MigrationExecutor::new(Arc::new(MockDatasetRepository::new(dataset)), store.clone());

    let stats = executor.execute().await.unwrap();

    assert_eq!(stats.warnings_creates_missing_submission, 1);
    assert_eq!(store.replace_count(), 1);
}
