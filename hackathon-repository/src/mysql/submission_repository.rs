use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use hackathon_shared::{
    AvailableEvent, EventParticipant, HackathonEvent, NewSubmission, ParticipantListing, Person,
    SubmissionSummary,
};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row, Transaction};
use tracing::debug;

use super::reader::{map_event, map_person};
use crate::errors::RepositoryError;
use crate::interfaces::SubmissionRepository;

pub(crate) const SUBMISSION_COLUMNS: &str = "s.submission_id, s.event_id, s.project_name, s.description, \
     s.submission_time, s.technology_stack, s.repository_url, s.submission_type, \
     e.name AS event_name";

/// MySQL implementation of the submission repository.
pub struct MySqlSubmissionRepository {
    pool: MySqlPool,
}

impl MySqlSubmissionRepository {
    pub async fn new(pool: MySqlPool) -> Result<Self, RepositoryError> {
        Ok(Self { pool })
    }

    async fn insert_submission_tx(
        &self,
        submission: &NewSubmission,
        tx: &mut Transaction<'_, MySql>,
    ) -> Result<i32, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO Submission
                (event_id, project_name, description, submission_time,
                 technology_stack, repository_url, submission_type)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(submission.event_id)
        .bind(&submission.project_name)
        .bind(&submission.description)
        .bind(submission.submission_time)
        .bind(&submission.technology_stack)
        .bind(&submission.repository_url)
        .bind(submission.submission_type.as_str())
        .execute(&mut **tx)
        .await?;

        i32::try_from(result.last_insert_id()).map_err(|_| {
            RepositoryError::invalid_data(format!(
                "submission id {} out of range",
                result.last_insert_id()
            ))
        })
    }

    async fn insert_team_tx(
        &self,
        submission_id: i32,
        team_member_ids: &[i32],
        tx: &mut Transaction<'_, MySql>,
    ) -> Result<(), RepositoryError> {
        if team_member_ids.is_empty() {
            return Ok(());
        }

        let mut qb = QueryBuilder::<MySql>::new("INSERT INTO Creates (person_id, submission_id) ");
        qb.push_values(team_member_ids, |mut b, person_id| {
            b.push_bind(*person_id).push_bind(submission_id);
        });
        qb.build().execute(&mut **tx).await?;
        Ok(())
    }
}

/// Team member names per submission, in `last_name, first_name` order.
async fn team_names(
    pool: &MySqlPool,
    submission_ids: &[i32],
) -> Result<HashMap<i32, Vec<String>>, RepositoryError> {
    let mut names: HashMap<i32, Vec<String>> = HashMap::new();
    if submission_ids.is_empty() {
        return Ok(names);
    }

    let mut qb = QueryBuilder::<MySql>::new(
        "SELECT c.submission_id, p.first_name, p.last_name
         FROM Creates c JOIN Person p ON c.person_id = p.person_id
         WHERE c.submission_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in submission_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY c.submission_id, p.last_name, p.first_name");

    for row in qb.build().fetch_all(pool).await? {
        let submission_id: i32 = row.try_get("submission_id")?;
        let first: String = row.try_get("first_name")?;
        let last: String = row.try_get("last_name")?;
        names
            .entry(submission_id)
            .or_default()
            .push(format!("{} {}", first, last));
    }
    Ok(names)
}

/// Maps submission rows and fills in their comma-joined team names.
pub(crate) async fn summaries_with_team_names(
    pool: &MySqlPool,
    rows: Vec<MySqlRow>,
) -> Result<Vec<SubmissionSummary>, RepositoryError> {
    let mut summaries = rows
        .iter()
        .map(map_summary)
        .collect::<Result<Vec<_>, _>>()?;

    let ids: Vec<i32> = summaries.iter().map(|s| s.submission_id).collect();
    let mut names = team_names(pool, &ids).await?;
    for summary in &mut summaries {
        summary.team_members = names.remove(&summary.submission_id).map(|n| n.join(", "));
    }
    Ok(summaries)
}

pub(crate) fn map_summary(row: &MySqlRow) -> Result<SubmissionSummary, sqlx::Error> {
    Ok(SubmissionSummary {
        submission_id: row.try_get("submission_id")?,
        event_id: row.try_get("event_id")?,
        project_name: row.try_get("project_name")?,
        description: row.try_get("description")?,
        submission_time: row.try_get("submission_time")?,
        technology_stack: row.try_get("technology_stack")?,
        repository_url: row.try_get("repository_url")?,
        submission_type: row.try_get("submission_type")?,
        event_name: row.try_get("event_name")?,
        team_members: None,
    })
}

#[async_trait]
impl SubmissionRepository for MySqlSubmissionRepository {
    async fn list_submissions(&self) -> Result<Vec<SubmissionSummary>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM Submission s
             LEFT JOIN HackathonEvent e ON s.event_id = e.event_id
             ORDER BY s.submission_time DESC, s.submission_id DESC",
            SUBMISSION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        summaries_with_team_names(&self.pool, rows).await
    }

    async fn get_submission(
        &self,
        submission_id: i32,
    ) -> Result<Option<SubmissionSummary>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM Submission s
             LEFT JOIN HackathonEvent e ON s.event_id = e.event_id
             WHERE s.submission_id = ?",
            SUBMISSION_COLUMNS
        ))
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(summaries_with_team_names(&self.pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_open_events(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<AvailableEvent>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT e.event_id, e.name, e.start_date, e.end_date, e.event_type,
                    e.max_participants, v.name AS venue_name,
                    (SELECT COUNT(*) FROM Submission s WHERE s.event_id = e.event_id) AS submission_count,
                    (SELECT COUNT(*) FROM Registration r WHERE r.event_id = e.event_id) AS registration_count
             FROM HackathonEvent e
             LEFT JOIN Venue v ON e.venue_id = v.venue_id
             WHERE e.end_date >= ?
             ORDER BY e.start_date ASC",
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                Ok(AvailableEvent {
                    event_id: row.try_get("event_id")?,
                    name: row.try_get("name")?,
                    start_date: row.try_get("start_date")?,
                    end_date: row.try_get("end_date")?,
                    event_type: row.try_get("event_type")?,
                    max_participants: row.try_get("max_participants")?,
                    venue_name: row.try_get("venue_name")?,
                    submission_count: row.try_get("submission_count")?,
                    registration_count: row.try_get("registration_count")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn find_event(&self, event_id: i32) -> Result<Option<HackathonEvent>, RepositoryError> {
        let row = sqlx::query(
            "SELECT event_id, name, start_date, end_date, event_type, max_participants, venue_id
             FROM HackathonEvent WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_event).transpose()?)
    }

    async fn list_event_participants(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventParticipant>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT p.person_id, p.first_name, p.last_name, p.email,
                    r.registration_number, r.ticket_type
             FROM Registration r
             JOIN Participant pt ON r.person_id = pt.person_id
             JOIN Person p ON pt.person_id = p.person_id
             WHERE r.event_id = ?
             ORDER BY p.last_name, p.first_name",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                Ok(EventParticipant {
                    person_id: row.try_get("person_id")?,
                    first_name: row.try_get("first_name")?,
                    last_name: row.try_get("last_name")?,
                    email: row.try_get("email")?,
                    registration_number: row.try_get("registration_number")?,
                    ticket_type: row.try_get("ticket_type")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn list_participants(&self) -> Result<Vec<ParticipantListing>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT p.person_id, p.first_name, p.last_name, p.email, pt.t_shirt_size
             FROM Participant pt JOIN Person p ON pt.person_id = p.person_id
             ORDER BY p.last_name, p.first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                Ok(ParticipantListing {
                    person_id: row.try_get("person_id")?,
                    first_name: row.try_get("first_name")?,
                    last_name: row.try_get("last_name")?,
                    email: row.try_get("email")?,
                    t_shirt_size: row.try_get("t_shirt_size")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn registered_person_ids(
        &self,
        event_id: i32,
        person_ids: &[i32],
    ) -> Result<HashSet<i32>, RepositoryError> {
        if person_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut qb = QueryBuilder::<MySql>::new("SELECT person_id FROM Registration WHERE event_id = ");
        qb.push_bind(event_id);
        qb.push(" AND person_id IN (");
        let mut separated = qb.separated(", ");
        for id in person_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(|row| row.try_get::<i32, _>("person_id"))
            .collect::<Result<_, _>>()?)
    }

    async fn find_people(&self, person_ids: &[i32]) -> Result<Vec<Person>, RepositoryError> {
        if person_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT person_id, first_name, last_name, email, phone FROM Person WHERE person_id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in person_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_person).collect::<Result<_, _>>()?)
    }

    async fn create_submission(&self, submission: &NewSubmission) -> Result<i32, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let submission_id = self.insert_submission_tx(submission, &mut tx).await?;
        self.insert_team_tx(submission_id, &submission.team_member_ids, &mut tx)
            .await?;
        tx.commit().await?;

        debug!(
            submission_id,
            members = submission.team_member_ids.len(),
            "Inserted submission with team"
        );
        Ok(submission_id)
    }

    async fn delete_submission(&self, submission_id: i32) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM Creates WHERE submission_id = ?")
            .bind(submission_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM Evaluates WHERE submission_id = ?")
            .bind(submission_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM Submission WHERE submission_id = ?")
            .bind(submission_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Nothing to delete; dropping the transaction rolls it back.
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
