use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use hackathon_shared::analytics::{
    capacity_percentage, RegistrationOverviewRow, SubmissionActivityRow, SystemTotals,
    WorkshopAnalyticsRow,
};
use hackathon_shared::SubmissionSummary;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

use super::submission_repository::{summaries_with_team_names, SUBMISSION_COLUMNS};
use crate::errors::RepositoryError;
use crate::interfaces::AnalyticsRepository;

const PAYMENT_COMPLETED: &str = "completed";
const PAYMENT_PENDING: &str = "pending";

/// MySQL implementation of the reporting queries.
///
/// Joins and filters run in SQL; grouping, string aggregation and percentages
/// are computed here so that every column decodes to a plain Rust type.
pub struct MySqlAnalyticsRepository {
    pool: MySqlPool,
}

impl MySqlAnalyticsRepository {
    pub async fn new(pool: MySqlPool) -> Result<Self, RepositoryError> {
        Ok(Self { pool })
    }

    async fn count(&self, table: &str) -> Result<i64, RepositoryError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS count FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}

#[derive(Default)]
struct RegistrationTally {
    total: i64,
    paid: i64,
    pending: i64,
    entries: Vec<String>,
}

#[async_trait]
impl AnalyticsRepository for MySqlAnalyticsRepository {
    async fn submission_activity(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        today: NaiveDate,
    ) -> Result<Vec<SubmissionActivityRow>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.submission_id, s.project_name, s.description, s.submission_time,
                    s.technology_stack, s.repository_url,
                    p.person_id, p.first_name, p.last_name, p.email,
                    pt.registration_date, pt.t_shirt_size, pt.dietary_restrictions,
                    (SELECT COUNT(*) FROM Creates c2 WHERE c2.person_id = pt.person_id)
                        AS total_submissions_by_participant
             FROM Submission s
             JOIN Creates c ON s.submission_id = c.submission_id
             JOIN Participant pt ON c.person_id = pt.person_id
             JOIN Person p ON pt.person_id = p.person_id
             WHERE s.submission_time >= ? AND s.submission_time <= ?
             ORDER BY s.submission_time DESC, p.last_name ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let registration_date: NaiveDate = row.try_get("registration_date")?;
                Ok(SubmissionActivityRow {
                    submission_id: row.try_get("submission_id")?,
                    project_name: row.try_get("project_name")?,
                    description: row.try_get("description")?,
                    submission_time: row.try_get("submission_time")?,
                    technology_stack: row.try_get("technology_stack")?,
                    repository_url: row.try_get("repository_url")?,
                    person_id: row.try_get("person_id")?,
                    participant_first_name: row.try_get("first_name")?,
                    participant_last_name: row.try_get("last_name")?,
                    participant_email: row.try_get("email")?,
                    registration_date,
                    t_shirt_size: row.try_get("t_shirt_size")?,
                    dietary_restrictions: row.try_get("dietary_restrictions")?,
                    days_since_registration: (today - registration_date).num_days(),
                    total_submissions_by_participant: row
                        .try_get("total_submissions_by_participant")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn registration_overview(
        &self,
        event_type: &str,
    ) -> Result<Vec<RegistrationOverviewRow>, RepositoryError> {
        let events = sqlx::query(
            "SELECT e.event_id, e.name, e.event_type, e.start_date, e.end_date, e.max_participants,
                    v.name AS venue_name, v.address AS venue_address, v.capacity AS venue_capacity
             FROM HackathonEvent e
             JOIN Venue v ON e.venue_id = v.venue_id
             WHERE e.event_type = ?
             ORDER BY e.event_id",
        )
        .bind(event_type)
        .fetch_all(&self.pool)
        .await?;

        let registrations = sqlx::query(
            "SELECT r.event_id, r.payment_status, r.ticket_type, p.first_name, p.last_name
             FROM Registration r
             JOIN HackathonEvent e ON r.event_id = e.event_id
             LEFT JOIN Person p ON r.person_id = p.person_id
             WHERE e.event_type = ?
             ORDER BY r.event_id, r.registration_timestamp, r.person_id",
        )
        .bind(event_type)
        .fetch_all(&self.pool)
        .await?;

        let mut tallies: HashMap<i32, RegistrationTally> = HashMap::new();
        for row in &registrations {
            let event_id: i32 = row.try_get("event_id")?;
            let status: Option<String> = row.try_get("payment_status")?;
            let ticket: Option<String> = row.try_get("ticket_type")?;
            let first: Option<String> = row.try_get("first_name")?;
            let last: Option<String> = row.try_get("last_name")?;

            let tally = tallies.entry(event_id).or_default();
            tally.total += 1;
            match status.as_deref() {
                Some(PAYMENT_COMPLETED) => tally.paid += 1,
                Some(PAYMENT_PENDING) => tally.pending += 1,
                _ => {}
            }
            if let (Some(first), Some(last)) = (first, last) {
                tally.entries.push(format!(
                    "{} {} ({})",
                    first,
                    last,
                    ticket.unwrap_or_default()
                ));
            }
        }

        let mut overview = events
            .iter()
            .map(|row| {
                let event_id: i32 = row.try_get("event_id")?;
                let max_participants: Option<i32> = row.try_get("max_participants")?;
                let tally = tallies.remove(&event_id).unwrap_or_default();
                Ok(RegistrationOverviewRow {
                    event_id,
                    event_name: row.try_get("name")?,
                    event_type: row.try_get("event_type")?,
                    start_date: row.try_get("start_date")?,
                    end_date: row.try_get("end_date")?,
                    max_participants,
                    venue_name: row.try_get("venue_name")?,
                    venue_address: row.try_get("venue_address")?,
                    venue_capacity: row.try_get("venue_capacity")?,
                    total_registrations: tally.total,
                    capacity_percentage: capacity_percentage(tally.total, max_participants),
                    paid_registrations: tally.paid,
                    pending_payments: tally.pending,
                    registered_participants: if tally.entries.is_empty() {
                        None
                    } else {
                        Some(tally.entries.join(", "))
                    },
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        // Stable sort keeps event id order among equal totals.
        overview.sort_by(|a, b| b.total_registrations.cmp(&a.total_registrations));
        Ok(overview)
    }

    async fn workshop_overview(
        &self,
        skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, RepositoryError> {
        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT w.workshop_number, w.event_id, w.title, w.description, w.duration,
                    w.skill_level, w.max_attendees,
                    e.name AS event_name, e.event_type, e.start_date, e.end_date,
                    e.max_participants,
                    v.venue_id, v.name AS venue_name, v.address AS venue_address,
                    v.capacity AS venue_capacity, v.facilities AS venue_facilities
             FROM Workshop w
             JOIN HackathonEvent e ON w.event_id = e.event_id
             LEFT JOIN Venue v ON e.venue_id = v.venue_id",
        );
        if let Some(level) = skill_level {
            qb.push(" WHERE w.skill_level = ");
            qb.push_bind(level);
        }
        qb.push(" ORDER BY e.start_date, w.workshop_number, w.event_id");

        let rows = qb.build().fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| {
                Ok(WorkshopAnalyticsRow {
                    workshop_number: row.try_get("workshop_number")?,
                    event_id: row.try_get("event_id")?,
                    workshop_title: row.try_get("title")?,
                    workshop_description: row.try_get("description")?,
                    duration: row.try_get("duration")?,
                    skill_level: row.try_get("skill_level")?,
                    max_attendees: row.try_get("max_attendees")?,
                    event_name: row.try_get("event_name")?,
                    event_type: row.try_get("event_type")?,
                    start_date: row.try_get("start_date")?,
                    end_date: row.try_get("end_date")?,
                    event_max_participants: row.try_get("max_participants")?,
                    venue_id: row.try_get("venue_id")?,
                    venue_name: row.try_get("venue_name")?,
                    venue_address: row.try_get("venue_address")?,
                    venue_capacity: row.try_get("venue_capacity")?,
                    venue_facilities: row.try_get("venue_facilities")?,
                    workshops_per_event: 0,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn totals(&self) -> Result<SystemTotals, RepositoryError> {
        Ok(SystemTotals {
            total_events: self.count("HackathonEvent").await?,
            total_participants: self.count("Participant").await?,
            total_submissions: self.count("Submission").await?,
            total_registrations: self.count("Registration").await?,
        })
    }

    async fn recent_submissions(
        &self,
        limit: i64,
    ) -> Result<Vec<SubmissionSummary>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM Submission s
             LEFT JOIN HackathonEvent e ON s.event_id = e.event_id
             ORDER BY s.submission_id DESC
             LIMIT ?",
            SUBMISSION_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        summaries_with_team_names(&self.pool, rows).await
    }
}
