//! Workshop request and read-model types, and the weak-entity numbering rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default workshop duration in minutes.
pub const DEFAULT_WORKSHOP_DURATION: i32 = 60;
pub const DEFAULT_SKILL_LEVEL: &str = "Beginner";
pub const DEFAULT_MAX_ATTENDEES: i32 = 30;

/// The event already holds a workshop numbered `i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No workshop number left after {0}")]
pub struct WorkshopNumberExhausted(pub i32);

/// Next partial key for a workshop of one event.
///
/// Numbers are allocated per event: the result is one more than the highest
/// existing number, or `1` when the event has no workshops yet. Gaps left by
/// deletions are not reused.
pub fn next_workshop_number<I>(existing: I) -> Result<i32, WorkshopNumberExhausted>
where
    I: IntoIterator<Item = i32>,
{
    let highest = existing.into_iter().max().unwrap_or(0);
    highest
        .checked_add(1)
        .ok_or(WorkshopNumberExhausted(highest))
}

/// Body of `POST /api/workshops` and `POST /api/nosql/workshops`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWorkshopRequest {
    pub event_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
}

/// Body of `PUT` on a single workshop. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkshopRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
}

/// Validated workshop fields with defaults applied. The number is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkshop {
    pub event_id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub skill_level: String,
    pub max_attendees: i32,
}

/// Validated changes for an existing workshop.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopChanges {
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
}

/// Workshop joined with its event and venue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkshopDetails {
    pub workshop_number: i32,
    pub event_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
    pub event_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventWorkshopCount {
    pub event_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub workshop_count: i64,
}
