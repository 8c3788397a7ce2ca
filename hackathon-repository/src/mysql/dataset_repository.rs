use async_trait::async_trait;
use hackathon_shared::{RelationalDataset, TableCounts};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row, Transaction};
use tracing::{debug, info};

use super::{reader, MIGRATOR};
use crate::errors::RepositoryError;
use crate::interfaces::DatasetRepository;

/// Maximum rows per multi-row INSERT statement.
const INSERT_CHUNK_SIZE: usize = 500;

/// Tables in child-to-parent order, the order in which they are cleared.
const TABLES_CHILD_FIRST: [&str; 12] = [
    "Evaluates",
    "Creates",
    "Supports",
    "Registration",
    "Workshop",
    "Submission",
    "Sponsor",
    "HackathonEvent",
    "Venue",
    "Judge",
    "Participant",
    "Person",
];

/// MySQL implementation of whole-dataset access.
pub struct MySqlDatasetRepository {
    pool: MySqlPool,
}

impl MySqlDatasetRepository {
    /// Creates a new repository on top of an existing pool.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured MySQL connection pool
    pub async fn new(pool: MySqlPool) -> Result<Self, RepositoryError> {
        Ok(Self { pool })
    }

    async fn clear_tables_tx(&self, tx: &mut Transaction<'_, MySql>) -> Result<(), RepositoryError> {
        // Managers reference other participants; unlink before deleting.
        sqlx::query("UPDATE Participant SET manager_id = NULL")
            .execute(&mut **tx)
            .await?;

        for table in TABLES_CHILD_FIRST {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Inserts every row of `dataset` within an active transaction.
    ///
    /// Parents are written before children. Participant managers are linked in
    /// a second pass so that rows may reference participants later in the list.
    async fn insert_dataset_tx(
        &self,
        dataset: &RelationalDataset,
        tx: &mut Transaction<'_, MySql>,
    ) -> Result<(), RepositoryError> {
        for chunk in dataset.people.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Person (person_id, first_name, last_name, email, phone) ",
            );
            qb.push_values(chunk, |mut b, p| {
                b.push_bind(p.person_id)
                    .push_bind(&p.first_name)
                    .push_bind(&p.last_name)
                    .push_bind(&p.email)
                    .push_bind(&p.phone);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.participants.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Participant (person_id, registration_date, t_shirt_size, dietary_restrictions, manager_id) ",
            );
            qb.push_values(chunk, |mut b, p| {
                b.push_bind(p.person_id)
                    .push_bind(p.registration_date)
                    .push_bind(&p.t_shirt_size)
                    .push_bind(&p.dietary_restrictions)
                    .push_bind(None::<i32>);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for participant in dataset.participants.iter().filter(|p| p.manager_id.is_some()) {
            sqlx::query("UPDATE Participant SET manager_id = ? WHERE person_id = ?")
                .bind(participant.manager_id)
                .bind(participant.person_id)
                .execute(&mut **tx)
                .await?;
        }

        for chunk in dataset.judges.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Judge (person_id, expertise_area, years_experience, organization) ",
            );
            qb.push_values(chunk, |mut b, j| {
                b.push_bind(j.person_id)
                    .push_bind(&j.expertise_area)
                    .push_bind(j.years_experience)
                    .push_bind(&j.organization);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.venues.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Venue (venue_id, name, address, capacity, facilities) ",
            );
            qb.push_values(chunk, |mut b, v| {
                b.push_bind(v.venue_id)
                    .push_bind(&v.name)
                    .push_bind(&v.address)
                    .push_bind(v.capacity)
                    .push_bind(&v.facilities);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.events.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO HackathonEvent (event_id, name, start_date, end_date, event_type, max_participants, venue_id) ",
            );
            qb.push_values(chunk, |mut b, e| {
                b.push_bind(e.event_id)
                    .push_bind(&e.name)
                    .push_bind(e.start_date)
                    .push_bind(e.end_date)
                    .push_bind(&e.event_type)
                    .push_bind(e.max_participants)
                    .push_bind(e.venue_id);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.sponsors.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Sponsor (sponsor_id, company_name, industry, website, contribution_amount) ",
            );
            qb.push_values(chunk, |mut b, s| {
                b.push_bind(s.sponsor_id)
                    .push_bind(&s.company_name)
                    .push_bind(&s.industry)
                    .push_bind(&s.website)
                    .push_bind(s.contribution_amount);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.submissions.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Submission (submission_id, event_id, project_name, description, submission_time, technology_stack, repository_url, submission_type) ",
            );
            qb.push_values(chunk, |mut b, s| {
                b.push_bind(s.submission_id)
                    .push_bind(s.event_id)
                    .push_bind(&s.project_name)
                    .push_bind(&s.description)
                    .push_bind(s.submission_time)
                    .push_bind(&s.technology_stack)
                    .push_bind(&s.repository_url)
                    .push_bind(&s.submission_type);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.workshops.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Workshop (workshop_number, event_id, title, description, duration, skill_level, max_attendees) ",
            );
            qb.push_values(chunk, |mut b, w| {
                b.push_bind(w.workshop_number)
                    .push_bind(w.event_id)
                    .push_bind(&w.title)
                    .push_bind(&w.description)
                    .push_bind(w.duration)
                    .push_bind(&w.skill_level)
                    .push_bind(w.max_attendees);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.registrations.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Registration (person_id, event_id, registration_number, registration_timestamp, payment_status, ticket_type) ",
            );
            qb.push_values(chunk, |mut b, r| {
                b.push_bind(r.person_id)
                    .push_bind(r.event_id)
                    .push_bind(&r.registration_number)
                    .push_bind(r.registration_timestamp)
                    .push_bind(&r.payment_status)
                    .push_bind(&r.ticket_type);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.supports.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new("INSERT INTO Supports (sponsor_id, event_id) ");
            qb.push_values(chunk, |mut b, s| {
                b.push_bind(s.sponsor_id).push_bind(s.event_id);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.creates.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new("INSERT INTO Creates (person_id, submission_id) ");
            qb.push_values(chunk, |mut b, c| {
                b.push_bind(c.person_id).push_bind(c.submission_id);
            });
            qb.build().execute(&mut **tx).await?;
        }

        for chunk in dataset.evaluates.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<MySql>::new(
                "INSERT INTO Evaluates (person_id, submission_id, score, feedback) ",
            );
            qb.push_values(chunk, |mut b, e| {
                b.push_bind(e.person_id)
                    .push_bind(e.submission_id)
                    .push_bind(e.score)
                    .push_bind(&e.feedback);
            });
            qb.build().execute(&mut **tx).await?;
        }

        Ok(())
    }

    async fn count_rows(&self, table: &str) -> Result<i64, RepositoryError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS count FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}

#[async_trait]
impl DatasetRepository for MySqlDatasetRepository {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        MIGRATOR.run(&self.pool).await?;
        debug!("Relational schema is up to date");
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn load_dataset(&self) -> Result<RelationalDataset, RepositoryError> {
        // One transaction gives every table the same consistent snapshot.
        let mut tx = self.pool.begin().await?;

        let dataset = RelationalDataset {
            people: reader::read_people(&mut tx).await?,
            participants: reader::read_participants(&mut tx).await?,
            judges: reader::read_judges(&mut tx).await?,
            venues: reader::read_venues(&mut tx).await?,
            events: reader::read_events(&mut tx).await?,
            sponsors: reader::read_sponsors(&mut tx).await?,
            submissions: reader::read_submissions(&mut tx).await?,
            workshops: reader::read_workshops(&mut tx).await?,
            registrations: reader::read_registrations(&mut tx).await?,
            supports: reader::read_supports(&mut tx).await?,
            creates: reader::read_creates(&mut tx).await?,
            evaluates: reader::read_evaluates(&mut tx).await?,
        };

        tx.commit().await?;
        Ok(dataset)
    }

    async fn replace_dataset(
        &self,
        dataset: &RelationalDataset,
    ) -> Result<TableCounts, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        self.clear_tables_tx(&mut tx).await?;
        self.insert_dataset_tx(dataset, &mut tx).await?;
        tx.commit().await?;

        let counts = dataset.table_counts();
        info!(
            people = counts.person,
            events = counts.hackathon_event,
            submissions = counts.submission,
            registrations = counts.registration,
            "Replaced relational dataset"
        );
        Ok(counts)
    }

    async fn table_counts(&self) -> Result<TableCounts, RepositoryError> {
        Ok(TableCounts {
            person: self.count_rows("Person").await?,
            participant: self.count_rows("Participant").await?,
            judge: self.count_rows("Judge").await?,
            venue: self.count_rows("Venue").await?,
            hackathon_event: self.count_rows("HackathonEvent").await?,
            sponsor: self.count_rows("Sponsor").await?,
            submission: self.count_rows("Submission").await?,
            workshop: self.count_rows("Workshop").await?,
            registration: self.count_rows("Registration").await?,
            supports: self.count_rows("Supports").await?,
            creates: self.count_rows("Creates").await?,
            evaluates: self.count_rows("Evaluates").await?,
        })
    }
}
