//! Denormalized document types stored in the document database.
//!
//! Every document is keyed by the relational primary key of its root entity
//! (`_id`). Related entities are embedded either as full child records or as
//! snapshots: frozen copies of a subset of another entity's fields taken at
//! migration time. Snapshots are never updated afterwards.
//!
//! Dates are stored as ISO-8601 strings (`YYYY-MM-DD`) and timestamps as
//! `YYYY-MM-DDTHH:MM:SS`, which keeps lexical order equal to chronological
//! order for sorting inside aggregation pipelines.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::entities::{HackathonEvent, Person, Venue, Workshop};

/// Collection holding one document per participant.
pub const PARTICIPANTS_COLLECTION: &str = "participants";
/// Collection holding one document per event, with embedded workshops.
pub const EVENTS_COLLECTION: &str = "events";
/// Collection holding one document per submission.
pub const SUBMISSIONS_COLLECTION: &str = "submissions";
/// Collections produced by earlier layouts that are dropped on every migration.
pub const LEGACY_COLLECTIONS: [&str; 3] = ["judges", "sponsors", "venues"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonSnapshot {
    pub person_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&Person> for PersonSnapshot {
    fn from(person: &Person) -> Self {
        Self {
            person_id: person.person_id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            email: person.email.clone(),
            phone: person.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VenueSnapshot {
    pub venue_id: i32,
    pub name: String,
    pub address: String,
    pub capacity: i32,
}

impl From<&Venue> for VenueSnapshot {
    fn from(venue: &Venue) -> Self {
        Self {
            venue_id: venue.venue_id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            capacity: venue.capacity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventSnapshot {
    pub event_id: i32,
    pub name: String,
    pub event_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_participants: Option<i32>,
    pub venue: Option<VenueSnapshot>,
}

impl EventSnapshot {
    pub fn new(event: &HackathonEvent, venue: Option<&Venue>) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name.clone(),
            event_type: event.event_type.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            max_participants: event.max_participants,
            venue: venue.map(VenueSnapshot::from),
        }
    }
}

/// Participant-specific attributes of the IS-A subclass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantDetails {
    pub registration_date: NaiveDate,
    pub t_shirt_size: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub manager_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantRegistration {
    pub event_id: i32,
    pub registration_number: String,
    pub registration_timestamp: NaiveDateTime,
    pub payment_status: Option<String>,
    pub ticket_type: Option<String>,
    pub event_snapshot: Option<EventSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantSubmission {
    pub submission_id: i32,
    pub project_name: String,
    pub submission_time: NaiveDateTime,
    pub repository_url: Option<String>,
    pub event_snapshot: Option<EventSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantDocument {
    #[serde(rename = "_id")]
    pub id: i32,
    pub person: Option<PersonSnapshot>,
    pub participant: ParticipantDetails,
    #[serde(default)]
    pub registrations: Vec<ParticipantRegistration>,
    #[serde(default)]
    pub submissions: Vec<ParticipantSubmission>,
}

/// Venue embedded in an event document. Includes facilities, unlike the
/// snapshot used elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventVenue {
    pub venue_id: i32,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub facilities: Option<String>,
}

impl From<&Venue> for EventVenue {
    fn from(venue: &Venue) -> Self {
        Self {
            venue_id: venue.venue_id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            capacity: venue.capacity,
            facilities: venue.facilities.clone(),
        }
    }
}

/// Workshop embedded in its owning event. The event id is implied by the parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedWorkshop {
    pub workshop_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
}

impl From<&Workshop> for EmbeddedWorkshop {
    fn from(workshop: &Workshop) -> Self {
        Self {
            workshop_number: workshop.workshop_number,
            title: workshop.title.clone(),
            description: workshop.description.clone(),
            duration: workshop.duration,
            skill_level: workshop.skill_level.clone(),
            max_attendees: workshop.max_attendees,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedSponsor {
    pub sponsor_id: i32,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub contribution_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRegistration {
    pub person_id: i32,
    pub registration_number: String,
    pub registration_timestamp: NaiveDateTime,
    pub payment_status: Option<String>,
    pub ticket_type: Option<String>,
    pub participant: PersonSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_type: Option<String>,
    pub max_participants: Option<i32>,
    pub venue: Option<EventVenue>,
    #[serde(default)]
    pub workshops: Vec<EmbeddedWorkshop>,
    #[serde(default)]
    pub sponsors: Vec<EmbeddedSponsor>,
    #[serde(default)]
    pub registrations: Vec<EventRegistration>,
}

impl EventDocument {
    pub fn workshop(&self, workshop_number: i32) -> Option<&EmbeddedWorkshop> {
        self.workshops
            .iter()
            .find(|w| w.workshop_number == workshop_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionEvaluation {
    pub judge_id: i32,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub judge: Option<PersonSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionDocument {
    #[serde(rename = "_id")]
    pub id: i32,
    pub event_id: i32,
    pub project_name: String,
    pub description: Option<String>,
    pub submission_time: NaiveDateTime,
    pub technology_stack: Option<String>,
    pub repository_url: Option<String>,
    pub submission_type: Option<String>,
    pub event_snapshot: Option<EventSnapshot>,
    #[serde(default)]
    pub team: Vec<PersonSnapshot>,
    #[serde(default)]
    pub evaluations: Vec<SubmissionEvaluation>,
}

/// The three document arrays written by one migration run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSet {
    pub participants: Vec<ParticipantDocument>,
    pub events: Vec<EventDocument>,
    pub submissions: Vec<SubmissionDocument>,
}

/// Document counts reported by the document store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentStoreStats {
    pub participants: u64,
    pub events: u64,
    pub submissions: u64,
    /// Workshops embedded across all event documents.
    pub workshops: u64,
}

/// Index description returned by the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexInfo {
    pub collection: String,
    pub name: String,
    pub keys: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_document_uses_primary_key_as_id() {
        let doc = EventDocument {
            id: 4,
            name: "Winter Hack".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            event_type: Some("Hackathon".to_string()),
            max_participants: Some(80),
            venue: None,
            workshops: vec![],
            sponsors: vec![],
            registrations: vec![],
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["_id"], 4);
        assert_eq!(json["start_date"], "2026-01-10");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_event_document_defaults_missing_arrays() {
        let json = serde_json::json!({
            "_id": 2,
            "name": "Autumn Hack",
            "start_date": "2026-10-01",
            "end_date": "2026-10-03",
            "event_type": null,
            "max_participants": null,
            "venue": null
        });

        let doc: EventDocument = serde_json::from_value(json).unwrap();
        assert!(doc.workshops.is_empty());
        assert!(doc.workshop(1).is_none());
    }
}
