//! Lookup tables built over a relational dataset.
//!
//! Primary-key maps resolve an id to its row; foreign-key maps group the rows
//! of association and child tables by the id they reference, one map per
//! direction the transform needs. Buckets keep rows in dataset order.

use std::collections::HashMap;

use hackathon_shared::{
    Creates, Evaluates, HackathonEvent, Judge, Participant, Person, RelationalDataset,
    Registration, Sponsor, Submission, Supports, Venue, Workshop,
};

/// Borrowed indexes over a [`RelationalDataset`].
#[derive(Debug, Default)]
pub struct LookupIndexes<'a> {
    pub people: HashMap<i32, &'a Person>,
    pub participants: HashMap<i32, &'a Participant>,
    pub judges: HashMap<i32, &'a Judge>,
    pub venues: HashMap<i32, &'a Venue>,
    pub events: HashMap<i32, &'a HackathonEvent>,
    pub sponsors: HashMap<i32, &'a Sponsor>,
    pub submissions: HashMap<i32, &'a Submission>,

    pub workshops_by_event: HashMap<i32, Vec<&'a Workshop>>,
    pub registrations_by_event: HashMap<i32, Vec<&'a Registration>>,
    pub registrations_by_person: HashMap<i32, Vec<&'a Registration>>,
    pub supports_by_event: HashMap<i32, Vec<&'a Supports>>,
    pub supports_by_sponsor: HashMap<i32, Vec<&'a Supports>>,
    pub creates_by_submission: HashMap<i32, Vec<&'a Creates>>,
    pub creates_by_person: HashMap<i32, Vec<&'a Creates>>,
    pub evaluates_by_submission: HashMap<i32, Vec<&'a Evaluates>>,
    pub evaluates_by_judge: HashMap<i32, Vec<&'a Evaluates>>,
}

fn by_key<'a, T, F>(rows: &'a [T], key: F) -> HashMap<i32, &'a T>
where
    F: Fn(&T) -> i32,
{
    rows.iter().map(|row| (key(row), row)).collect()
}

fn group_by<'a, T, F>(rows: &'a [T], key: F) -> HashMap<i32, Vec<&'a T>>
where
    F: Fn(&T) -> i32,
{
    let mut groups: HashMap<i32, Vec<&'a T>> = HashMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

impl<'a> LookupIndexes<'a> {
    /// Index every table of `dataset`. Performs no I/O.
    pub fn build(dataset: &'a RelationalDataset) -> Self {
        Self {
            people: by_key(&dataset.people, |p| p.person_id),
            participants: by_key(&dataset.participants, |p| p.person_id),
            judges: by_key(&dataset.judges, |j| j.person_id),
            venues: by_key(&dataset.venues, |v| v.venue_id),
            events: by_key(&dataset.events, |e| e.event_id),
            sponsors: by_key(&dataset.sponsors, |s| s.sponsor_id),
            submissions: by_key(&dataset.submissions, |s| s.submission_id),

            workshops_by_event: group_by(&dataset.workshops, |w| w.event_id),
            registrations_by_event: group_by(&dataset.registrations, |r| r.event_id),
            registrations_by_person: group_by(&dataset.registrations, |r| r.person_id),
            supports_by_event: group_by(&dataset.supports, |s| s.event_id),
            supports_by_sponsor: group_by(&dataset.supports, |s| s.sponsor_id),
            creates_by_submission: group_by(&dataset.creates, |c| c.submission_id),
            creates_by_person: group_by(&dataset.creates, |c| c.person_id),
            evaluates_by_submission: group_by(&dataset.evaluates, |e| e.submission_id),
            evaluates_by_judge: group_by(&dataset.evaluates, |e| e.person_id),
        }
    }

    pub fn person(&self, person_id: i32) -> Option<&'a Person> {
        self.people.get(&person_id).copied()
    }

    pub fn event(&self, event_id: i32) -> Option<&'a HackathonEvent> {
        self.events.get(&event_id).copied()
    }

    /// Venue of an event, if the event has one and it exists.
    pub fn venue_of(&self, event: &HackathonEvent) -> Option<&'a Venue> {
        event
            .venue_id
            .and_then(|venue_id| self.venues.get(&venue_id).copied())
    }

    pub fn submission(&self, submission_id: i32) -> Option<&'a Submission> {
        self.submissions.get(&submission_id).copied()
    }

    pub fn sponsor(&self, sponsor_id: i32) -> Option<&'a Sponsor> {
        self.sponsors.get(&sponsor_id).copied()
    }

    pub fn workshops_of_event(&self, event_id: i32) -> &[&'a Workshop] {
        slice(&self.workshops_by_event, event_id)
    }

    pub fn registrations_of_event(&self, event_id: i32) -> &[&'a Registration] {
        slice(&self.registrations_by_event, event_id)
    }

    pub fn registrations_of_person(&self, person_id: i32) -> &[&'a Registration] {
        slice(&self.registrations_by_person, person_id)
    }

    pub fn supports_of_event(&self, event_id: i32) -> &[&'a Supports] {
        slice(&self.supports_by_event, event_id)
    }

    pub fn creates_of_submission(&self, submission_id: i32) -> &[&'a Creates] {
        slice(&self.creates_by_submission, submission_id)
    }

    pub fn creates_of_person(&self, person_id: i32) -> &[&'a Creates] {
        slice(&self.creates_by_person, person_id)
    }

    pub fn evaluates_of_submission(&self, submission_id: i32) -> &[&'a Evaluates] {
        slice(&self.evaluates_by_submission, submission_id)
    }
}

fn slice<'m, T>(map: &'m HashMap<i32, Vec<T>>, key: i32) -> &'m [T] {
    map.get(&key).map(Vec::as_slice).unwrap_or(&[])
}
