//! Full-table readers, one per relational table.
//!
//! Rows are read in primary key order so that the dataset, and every
//! document built from it, is deterministic for unchanged data.

use bigdecimal::{BigDecimal, ToPrimitive};
use hackathon_shared::{
    Creates, Evaluates, HackathonEvent, Judge, Participant, Person, Registration, Sponsor,
    Submission, Supports, Venue, Workshop,
};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlConnection, Row};

use crate::errors::RepositoryError;

pub(crate) fn decimal_to_f64(value: Option<BigDecimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

pub(crate) fn map_person(row: &MySqlRow) -> Result<Person, sqlx::Error> {
    Ok(Person {
        person_id: row.try_get("person_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
    })
}

pub(crate) fn map_event(row: &MySqlRow) -> Result<HackathonEvent, sqlx::Error> {
    Ok(HackathonEvent {
        event_id: row.try_get("event_id")?,
        name: row.try_get("name")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        event_type: row.try_get("event_type")?,
        max_participants: row.try_get("max_participants")?,
        venue_id: row.try_get("venue_id")?,
    })
}

pub(crate) fn map_workshop(row: &MySqlRow) -> Result<Workshop, sqlx::Error> {
    Ok(Workshop {
        workshop_number: row.try_get("workshop_number")?,
        event_id: row.try_get("event_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        duration: row.try_get("duration")?,
        skill_level: row.try_get("skill_level")?,
        max_attendees: row.try_get("max_attendees")?,
    })
}

/// Read all persons.
pub async fn read_people(conn: &mut MySqlConnection) -> Result<Vec<Person>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT person_id, first_name, last_name, email, phone FROM Person ORDER BY person_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.iter().map(map_person).collect::<Result<_, _>>()?)
}

/// Read all participants.
pub async fn read_participants(
    conn: &mut MySqlConnection,
) -> Result<Vec<Participant>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT person_id, registration_date, t_shirt_size, dietary_restrictions, manager_id
         FROM Participant ORDER BY person_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Participant {
                person_id: row.try_get("person_id")?,
                registration_date: row.try_get("registration_date")?,
                t_shirt_size: row.try_get("t_shirt_size")?,
                dietary_restrictions: row.try_get("dietary_restrictions")?,
                manager_id: row.try_get("manager_id")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all judges.
pub async fn read_judges(conn: &mut MySqlConnection) -> Result<Vec<Judge>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT person_id, expertise_area, years_experience, organization
         FROM Judge ORDER BY person_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Judge {
                person_id: row.try_get("person_id")?,
                expertise_area: row.try_get("expertise_area")?,
                years_experience: row.try_get("years_experience")?,
                organization: row.try_get("organization")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all venues.
pub async fn read_venues(conn: &mut MySqlConnection) -> Result<Vec<Venue>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT venue_id, name, address, capacity, facilities FROM Venue ORDER BY venue_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Venue {
                venue_id: row.try_get("venue_id")?,
                name: row.try_get("name")?,
                address: row.try_get("address")?,
                capacity: row.try_get("capacity")?,
                facilities: row.try_get("facilities")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all events.
pub async fn read_events(
    conn: &mut MySqlConnection,
) -> Result<Vec<HackathonEvent>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT event_id, name, start_date, end_date, event_type, max_participants, venue_id
         FROM HackathonEvent ORDER BY event_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.iter().map(map_event).collect::<Result<_, _>>()?)
}

/// Read all sponsors.
pub async fn read_sponsors(conn: &mut MySqlConnection) -> Result<Vec<Sponsor>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT sponsor_id, company_name, industry, website, contribution_amount
         FROM Sponsor ORDER BY sponsor_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Sponsor {
                sponsor_id: row.try_get("sponsor_id")?,
                company_name: row.try_get("company_name")?,
                industry: row.try_get("industry")?,
                website: row.try_get("website")?,
                contribution_amount: decimal_to_f64(row.try_get("contribution_amount")?),
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all submissions.
pub async fn read_submissions(
    conn: &mut MySqlConnection,
) -> Result<Vec<Submission>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT submission_id, event_id, project_name, description, submission_time,
                technology_stack, repository_url, submission_type
         FROM Submission ORDER BY submission_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Submission {
                submission_id: row.try_get("submission_id")?,
                event_id: row.try_get("event_id")?,
                project_name: row.try_get("project_name")?,
                description: row.try_get("description")?,
                submission_time: row.try_get("submission_time")?,
                technology_stack: row.try_get("technology_stack")?,
                repository_url: row.try_get("repository_url")?,
                submission_type: row.try_get("submission_type")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all workshops.
pub async fn read_workshops(conn: &mut MySqlConnection) -> Result<Vec<Workshop>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT workshop_number, event_id, title, description, duration, skill_level, max_attendees
         FROM Workshop ORDER BY event_id, workshop_number",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.iter().map(map_workshop).collect::<Result<_, _>>()?)
}

/// Read all registrations.
pub async fn read_registrations(
    conn: &mut MySqlConnection,
) -> Result<Vec<Registration>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT person_id, event_id, registration_number, registration_timestamp,
                payment_status, ticket_type
         FROM Registration ORDER BY event_id, person_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Registration {
                person_id: row.try_get("person_id")?,
                event_id: row.try_get("event_id")?,
                registration_number: row.try_get("registration_number")?,
                registration_timestamp: row.try_get("registration_timestamp")?,
                payment_status: row.try_get("payment_status")?,
                ticket_type: row.try_get("ticket_type")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all sponsor-event associations.
pub async fn read_supports(conn: &mut MySqlConnection) -> Result<Vec<Supports>, RepositoryError> {
    let rows = sqlx::query("SELECT sponsor_id, event_id FROM Supports ORDER BY event_id, sponsor_id")
        .fetch_all(conn)
        .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Supports {
                sponsor_id: row.try_get("sponsor_id")?,
                event_id: row.try_get("event_id")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all team memberships.
pub async fn read_creates(conn: &mut MySqlConnection) -> Result<Vec<Creates>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT person_id, submission_id FROM Creates ORDER BY submission_id, person_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Creates {
                person_id: row.try_get("person_id")?,
                submission_id: row.try_get("submission_id")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}

/// Read all evaluations.
pub async fn read_evaluates(conn: &mut MySqlConnection) -> Result<Vec<Evaluates>, RepositoryError> {
    let rows = sqlx::query(
        "SELECT person_id, submission_id, score, feedback
         FROM Evaluates ORDER BY submission_id, person_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            Ok(Evaluates {
                person_id: row.try_get("person_id")?,
                submission_id: row.try_get("submission_id")?,
                score: decimal_to_f64(row.try_get("score")?),
                feedback: row.try_get("feedback")?,
            })
        })
        .collect::<Result<_, sqlx::Error>>()?)
}
