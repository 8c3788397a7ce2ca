use async_trait::async_trait;
use hackathon_shared::{EventWorkshopCount, NewWorkshop, Workshop, WorkshopChanges, WorkshopDetails};

use crate::errors::RepositoryError;

/// Relational storage for the `Workshop` weak entity.
#[async_trait]
pub trait WorkshopRepository: Send + Sync {
    /// Every workshop with its event and venue, ordered by event start date then number.
    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, RepositoryError>;

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, RepositoryError>;

    /// Workshops of one event ordered by number.
    async fn list_event_workshops(&self, event_id: i32) -> Result<Vec<Workshop>, RepositoryError>;

    async fn get_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<Option<WorkshopDetails>, RepositoryError>;

    async fn event_exists(&self, event_id: i32) -> Result<bool, RepositoryError>;

    /// Insert a workshop, allocating the next number for its event.
    ///
    /// The number is computed and the row inserted in the same transaction.
    ///
    /// # Returns
    ///
    /// * `Ok(Workshop)` - The stored workshop including its assigned number
    /// * `Err(RepositoryError)` - Nothing was written
    async fn create_workshop(&self, workshop: &NewWorkshop) -> Result<Workshop, RepositoryError>;

    /// Apply `changes` to one workshop. Returns `false` when it does not exist.
    async fn update_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
        changes: &WorkshopChanges,
    ) -> Result<bool, RepositoryError>;

    /// Delete one workshop. Returns `false` when it does not exist.
    async fn delete_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<bool, RepositoryError>;
}
