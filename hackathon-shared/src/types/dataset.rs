//! Full snapshot of the relational store.

use serde::{Deserialize, Serialize};

use super::entities::{
    Creates, Evaluates, HackathonEvent, Judge, Participant, Person, Registration, Sponsor,
    Submission, Supports, Venue, Workshop,
};

/// The complete contents of all twelve relational tables.
///
/// Loaded in one pass by the migration pipeline and written in one
/// transaction by the data import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelationalDataset {
    pub people: Vec<Person>,
    pub participants: Vec<Participant>,
    pub judges: Vec<Judge>,
    pub venues: Vec<Venue>,
    pub events: Vec<HackathonEvent>,
    pub sponsors: Vec<Sponsor>,
    pub submissions: Vec<Submission>,
    pub workshops: Vec<Workshop>,
    pub registrations: Vec<Registration>,
    pub supports: Vec<Supports>,
    pub creates: Vec<Creates>,
    pub evaluates: Vec<Evaluates>,
}

impl RelationalDataset {
    /// Row counts per table, in schema order.
    pub fn table_counts(&self) -> TableCounts {
        TableCounts {
            person: self.people.len() as i64,
            participant: self.participants.len() as i64,
            judge: self.judges.len() as i64,
            venue: self.venues.len() as i64,
            hackathon_event: self.events.len() as i64,
            sponsor: self.sponsors.len() as i64,
            submission: self.submissions.len() as i64,
            workshop: self.workshops.len() as i64,
            registration: self.registrations.len() as i64,
            supports: self.supports.len() as i64,
            creates: self.creates.len() as i64,
            evaluates: self.evaluates.len() as i64,
        }
    }
}

/// Number of rows in every relational table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableCounts {
    pub person: i64,
    pub participant: i64,
    pub judge: i64,
    pub venue: i64,
    pub hackathon_event: i64,
    pub sponsor: i64,
    pub submission: i64,
    pub workshop: i64,
    pub registration: i64,
    pub supports: i64,
    pub creates: i64,
    pub evaluates: i64,
}
