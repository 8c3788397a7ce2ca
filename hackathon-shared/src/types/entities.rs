//! Row types for the relational tables.
//!
//! Each struct mirrors one table of the relational schema. `Participant` and
//! `Judge` are IS-A subclasses of `Person` and share its primary key.
//! `Workshop` is a weak entity identified by `(workshop_number, event_id)`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub person_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Person {
    /// Display name used in listings and validation messages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub person_id: i32,
    pub registration_date: NaiveDate,
    pub t_shirt_size: Option<String>,
    pub dietary_restrictions: Option<String>,
    /// Recursive reference to another participant acting as team manager.
    pub manager_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Judge {
    pub person_id: i32,
    pub expertise_area: Option<String>,
    pub years_experience: Option<i32>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Venue {
    pub venue_id: i32,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub facilities: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HackathonEvent {
    pub event_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_type: Option<String>,
    pub max_participants: Option<i32>,
    pub venue_id: Option<i32>,
}

impl HackathonEvent {
    /// Returns true while submissions are still accepted on `today`.
    ///
    /// The final day of the event is inclusive.
    pub fn accepts_submissions_on(&self, today: NaiveDate) -> bool {
        today <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sponsor {
    pub sponsor_id: i32,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub contribution_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub submission_id: i32,
    pub event_id: i32,
    pub project_name: String,
    pub description: Option<String>,
    pub submission_time: NaiveDateTime,
    pub technology_stack: Option<String>,
    pub repository_url: Option<String>,
    pub submission_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workshop {
    pub workshop_number: i32,
    pub event_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Duration in minutes.
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub person_id: i32,
    pub event_id: i32,
    pub registration_number: String,
    pub registration_timestamp: NaiveDateTime,
    pub payment_status: Option<String>,
    pub ticket_type: Option<String>,
}

/// Sponsor ↔ event association.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supports {
    pub sponsor_id: i32,
    pub event_id: i32,
}

/// Participant ↔ submission association (team membership).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creates {
    pub person_id: i32,
    pub submission_id: i32,
}

/// Judge ↔ submission association carrying the evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluates {
    pub person_id: i32,
    pub submission_id: i32,
    pub score: Option<f64>,
    pub feedback: Option<String>,
}
