use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use hackathon_shared::analytics::{
    RegistrationOverviewRow, SubmissionActivityRow, SystemTotals, WorkshopAnalyticsRow,
};
use hackathon_shared::SubmissionSummary;

use crate::errors::RepositoryError;

/// Read-only reporting queries over the relational store.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// One row per (submission, creator) with `start <= submission_time <= end`.
    ///
    /// Ordered by submission time descending, then creator last name.
    /// `days_since_registration` is measured up to `today`.
    async fn submission_activity(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        today: NaiveDate,
    ) -> Result<Vec<SubmissionActivityRow>, RepositoryError>;

    /// Registration statistics for every event of `event_type` that has a venue,
    /// ordered by total registrations descending.
    async fn registration_overview(
        &self,
        event_type: &str,
    ) -> Result<Vec<RegistrationOverviewRow>, RepositoryError>;

    /// Workshops joined with event and venue, optionally filtered by skill level.
    async fn workshop_overview(
        &self,
        skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, RepositoryError>;

    async fn totals(&self) -> Result<SystemTotals, RepositoryError>;

    /// The `limit` most recently created submissions.
    async fn recent_submissions(
        &self,
        limit: i64,
    ) -> Result<Vec<SubmissionSummary>, RepositoryError>;
}
