use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use hackathon_shared::{
    AvailableEvent, EventParticipant, HackathonEvent, NewSubmission, ParticipantListing, Person,
    SubmissionSummary,
};

use crate::errors::RepositoryError;

/// Storage operations behind the submission workflow.
///
/// Business rules (event window, registration checks, type consistency) are
/// enforced by the caller; this trait only reads and writes rows.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// All submissions with event name and team names, newest first.
    async fn list_submissions(&self) -> Result<Vec<SubmissionSummary>, RepositoryError>;

    /// A single submission with event name and team names.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SubmissionSummary))` - The submission exists
    /// * `Ok(None)` - No submission has this id
    /// * `Err(RepositoryError)` - The query failed
    async fn get_submission(
        &self,
        submission_id: i32,
    ) -> Result<Option<SubmissionSummary>, RepositoryError>;

    /// Events whose end date is on or after `today`, with submission and registration counts.
    async fn list_open_events(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<AvailableEvent>, RepositoryError>;

    async fn find_event(&self, event_id: i32) -> Result<Option<HackathonEvent>, RepositoryError>;

    /// Participants registered for an event, ordered by last then first name.
    async fn list_event_participants(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventParticipant>, RepositoryError>;

    async fn list_participants(&self) -> Result<Vec<ParticipantListing>, RepositoryError>;

    /// Subset of `person_ids` holding a registration for `event_id`.
    async fn registered_person_ids(
        &self,
        event_id: i32,
        person_ids: &[i32],
    ) -> Result<HashSet<i32>, RepositoryError>;

    /// Person rows for the given ids. Unknown ids are silently absent.
    async fn find_people(&self, person_ids: &[i32]) -> Result<Vec<Person>, RepositoryError>;

    /// Insert a submission and one `Creates` row per team member.
    ///
    /// Both inserts happen in one transaction; if any member row fails the
    /// submission row is rolled back as well.
    ///
    /// # Returns
    ///
    /// * `Ok(i32)` - The generated submission id
    /// * `Err(RepositoryError)` - Nothing was written
    async fn create_submission(&self, submission: &NewSubmission) -> Result<i32, RepositoryError>;

    /// Delete a submission together with its `Creates` and `Evaluates` rows.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The submission was deleted
    /// * `Ok(false)` - No submission had this id
    /// * `Err(RepositoryError)` - The transaction was rolled back
    async fn delete_submission(&self, submission_id: i32) -> Result<bool, RepositoryError>;
}
