use async_trait::async_trait;
use hackathon_shared::{
    EventWorkshopCount, NewWorkshop, Workshop, WorkshopChanges, WorkshopDetails,
};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row, Transaction};
use tracing::debug;

use super::reader::map_workshop;
use crate::errors::RepositoryError;
use crate::interfaces::WorkshopRepository;

const WORKSHOP_DETAILS_QUERY: &str = "SELECT w.workshop_number, w.event_id, w.title, w.description,
        w.duration, w.skill_level, w.max_attendees,
        e.name AS event_name, e.start_date, e.end_date,
        v.name AS venue_name, v.address AS venue_address
 FROM Workshop w
 JOIN HackathonEvent e ON w.event_id = e.event_id
 LEFT JOIN Venue v ON e.venue_id = v.venue_id";

/// MySQL implementation of the workshop repository.
///
/// Workshop numbers are allocated per event inside the inserting transaction.
pub struct MySqlWorkshopRepository {
    pool: MySqlPool,
}

impl MySqlWorkshopRepository {
    pub async fn new(pool: MySqlPool) -> Result<Self, RepositoryError> {
        Ok(Self { pool })
    }

    async fn next_number_tx(
        &self,
        event_id: i32,
        tx: &mut Transaction<'_, MySql>,
    ) -> Result<i32, RepositoryError> {
        let row = sqlx::query(
            "SELECT CAST(COALESCE(MAX(workshop_number), 0) + 1 AS SIGNED) AS next_number
             FROM Workshop WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_one(&mut **tx)
        .await?;

        let next: i64 = row.try_get("next_number")?;
        i32::try_from(next)
            .map_err(|_| RepositoryError::invalid_data(format!("workshop number {} out of range", next)))
    }
}

fn map_details(row: &MySqlRow) -> Result<WorkshopDetails, sqlx::Error> {
    Ok(WorkshopDetails {
        workshop_number: row.try_get("workshop_number")?,
        event_id: row.try_get("event_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        duration: row.try_get("duration")?,
        skill_level: row.try_get("skill_level")?,
        max_attendees: row.try_get("max_attendees")?,
        event_name: row.try_get("event_name")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        venue_name: row.try_get("venue_name")?,
        venue_address: row.try_get("venue_address")?,
    })
}

#[async_trait]
impl WorkshopRepository for MySqlWorkshopRepository {
    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY e.start_date, w.event_id, w.workshop_number",
            WORKSHOP_DETAILS_QUERY
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_details).collect::<Result<_, _>>()?)
    }

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT e.event_id, e.name, e.start_date, e.end_date,
                    (SELECT COUNT(*) FROM Workshop w WHERE w.event_id = e.event_id) AS workshop_count
             FROM HackathonEvent e
             ORDER BY e.start_date",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                Ok(EventWorkshopCount {
                    event_id: row.try_get("event_id")?,
                    name: row.try_get("name")?,
                    start_date: row.try_get("start_date")?,
                    end_date: row.try_get("end_date")?,
                    workshop_count: row.try_get("workshop_count")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn list_event_workshops(&self, event_id: i32) -> Result<Vec<Workshop>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT workshop_number, event_id, title, description, duration, skill_level, max_attendees
             FROM Workshop WHERE event_id = ? ORDER BY workshop_number",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_workshop).collect::<Result<_, _>>()?)
    }

    async fn get_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<Option<WorkshopDetails>, RepositoryError> {
        let row = sqlx::query(&format!(
            "{} WHERE w.event_id = ? AND w.workshop_number = ?",
            WORKSHOP_DETAILS_QUERY
        ))
        .bind(event_id)
        .bind(workshop_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_details).transpose()?)
    }

    async fn event_exists(&self, event_id: i32) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 AS present FROM HackathonEvent WHERE event_id = ?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn create_workshop(&self, workshop: &NewWorkshop) -> Result<Workshop, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let workshop_number = self.next_number_tx(workshop.event_id, &mut tx).await?;

        sqlx::query(
            "INSERT INTO Workshop
                (workshop_number, event_id, title, description, duration, skill_level, max_attendees)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(workshop_number)
        .bind(workshop.event_id)
        .bind(&workshop.title)
        .bind(&workshop.description)
        .bind(workshop.duration)
        .bind(&workshop.skill_level)
        .bind(workshop.max_attendees)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(event_id = workshop.event_id, workshop_number, "Created workshop");

        Ok(Workshop {
            workshop_number,
            event_id: workshop.event_id,
            title: workshop.title.clone(),
            description: Some(workshop.description.clone()),
            duration: Some(workshop.duration),
            skill_level: Some(workshop.skill_level.clone()),
            max_attendees: Some(workshop.max_attendees),
        })
    }

    async fn update_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
        changes: &WorkshopChanges,
    ) -> Result<bool, RepositoryError> {
        if self.get_workshop(event_id, workshop_number).await?.is_none() {
            return Ok(false);
        }

        // Affected rows is zero for an unchanged row in MySQL, so existence is
        // checked separately above.
        sqlx::query(
            "UPDATE Workshop
             SET title = ?,
                 description = COALESCE(?, description),
                 duration = COALESCE(?, duration),
                 skill_level = COALESCE(?, skill_level),
                 max_attendees = COALESCE(?, max_attendees)
             WHERE event_id = ? AND workshop_number = ?",
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.duration)
        .bind(&changes.skill_level)
        .bind(changes.max_attendees)
        .bind(event_id)
        .bind(workshop_number)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn delete_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM Workshop WHERE event_id = ? AND workshop_number = ?")
            .bind(event_id)
            .bind(workshop_number)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
