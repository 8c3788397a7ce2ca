use async_trait::async_trait;
use hackathon_shared::analytics::WorkshopAnalyticsRow;
use hackathon_shared::{
    DocumentSet, DocumentStoreStats, EmbeddedWorkshop, EventDocument, EventWorkshopCount,
    IndexInfo, WorkshopChanges, WorkshopDetails,
};

use crate::errors::DocumentStoreError;

/// Outcome of removing an embedded workshop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopRemoval {
    Removed,
    EventNotFound,
    WorkshopNotFound,
}

/// Abstracts the denormalized document store.
///
/// Holds the `participants`, `events` and `submissions` collections produced
/// by the migration pipeline, and supports editing the workshops embedded in
/// event documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the store answers a ping.
    async fn ping(&self) -> Result<(), DocumentStoreError>;

    /// Replace the three target collections with `documents`.
    ///
    /// Deletes every document in the target collections, drops the legacy
    /// collections, then bulk-inserts each non-empty array.
    ///
    /// # Arguments
    ///
    /// * `documents` - Fully built documents; nothing is transformed here
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The collections hold exactly `documents`
    /// * `Err(DocumentStoreError)` - A write failed; the collections may be partially written
    async fn replace_collections(&self, documents: &DocumentSet) -> Result<(), DocumentStoreError>;

    /// Document counts per collection plus the number of embedded workshops.
    async fn stats(&self) -> Result<DocumentStoreStats, DocumentStoreError>;

    async fn find_event(&self, event_id: i32) -> Result<Option<EventDocument>, DocumentStoreError>;

    /// Every embedded workshop flattened with its event and venue.
    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, DocumentStoreError>;

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, DocumentStoreError>;

    /// Append `workshop` to the event's embedded array.
    ///
    /// The push only applies while no workshop with the same number exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The workshop was appended
    /// * `Ok(false)` - The event is missing or the number is already taken
    async fn push_workshop(
        &self,
        event_id: i32,
        workshop: &EmbeddedWorkshop,
    ) -> Result<bool, DocumentStoreError>;

    /// Update one embedded workshop in place. Returns `false` when it does not exist.
    async fn update_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
        changes: &WorkshopChanges,
    ) -> Result<bool, DocumentStoreError>;

    async fn pull_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<WorkshopRemoval, DocumentStoreError>;

    /// Create the analytics indexes. Returns the created index names.
    async fn create_indexes(&self) -> Result<Vec<String>, DocumentStoreError>;

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DocumentStoreError>;

    /// Embedded workshops flattened with event and venue fields,
    /// sorted by event start date then workshop number.
    async fn workshop_analytics(
        &self,
        skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, DocumentStoreError>;

    /// Execution statistics of the workshop analytics pipeline.
    async fn explain_workshop_analytics(
        &self,
        skill_level: Option<&str>,
    ) -> Result<serde_json::Value, DocumentStoreError>;
}
