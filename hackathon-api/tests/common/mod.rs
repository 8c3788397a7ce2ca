//! In-memory stores shared by the API integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use hackathon_api::AppState;
use hackathon_repository::{
    AnalyticsRepository, DatasetRepository, DocumentStore, DocumentStoreError, RepositoryError,
    SubmissionRepository, WorkshopRemoval, WorkshopRepository,
};
use hackathon_shared::analytics::{
    RegistrationOverviewRow, SubmissionActivityRow, SystemTotals, WorkshopAnalyticsRow,
};
use hackathon_shared::{
    next_workshop_number, AvailableEvent, Creates, DocumentSet, DocumentStoreStats,
    EmbeddedWorkshop, EventDocument, EventParticipant, EventWorkshopCount, HackathonEvent,
    IndexInfo, NewSubmission, NewWorkshop, Participant, ParticipantListing, Person,
    RelationalDataset, Registration, Submission, SubmissionSummary, TableCounts, Venue, Workshop,
    WorkshopChanges, WorkshopDetails,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixed test clock: 2026-10-16 12:30:00.250.
pub fn fixed_clock() -> NaiveDateTime {
    date(2026, 10, 16).and_hms_milli_opt(12, 30, 0, 250).unwrap()
}

fn person(person_id: i32, first_name: &str, last_name: &str) -> Person {
    Person {
        person_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: None,
    }
}

fn participant(person_id: i32) -> Participant {
    Participant {
        person_id,
        registration_date: date(2026, 9, 1),
        t_shirt_size: Some("M".to_string()),
        dietary_restrictions: None,
        manager_id: None,
    }
}

fn registration(person_id: i32, event_id: i32) -> Registration {
    Registration {
        person_id,
        event_id,
        registration_number: format!("REG-{}-{}", event_id, person_id),
        registration_timestamp: date(2026, 9, 2).and_hms_opt(10, 0, 0).unwrap(),
        payment_status: Some("Paid".to_string()),
        ticket_type: Some("Regular".to_string()),
    }
}

fn workshop(event_id: i32, workshop_number: i32, title: &str) -> Workshop {
    Workshop {
        workshop_number,
        event_id,
        title: title.to_string(),
        description: None,
        duration: Some(90),
        skill_level: Some("Intermediate".to_string()),
        max_attendees: Some(25),
    }
}

/// Small dataset used by the router tests.
///
/// * event 1 "Spring Hack" is open on the test clock; event 2 "Past Hack" has ended
/// * Ada (1) and Alan (2) are registered for event 1, Grace (6) only for event 2
/// * event 1 has workshops 1 and 2
pub fn fixture_dataset() -> RelationalDataset {
    RelationalDataset {
        people: vec![
            person(1, "Ada", "Lovelace"),
            person(2, "Alan", "Turing"),
            person(6, "Grace", "Hopper"),
        ],
        participants: vec![participant(1), participant(2), participant(6)],
        venues: vec![Venue {
            venue_id: 1,
            name: "Innovation Hub".to_string(),
            address: "1 Main St".to_string(),
            capacity: 200,
            facilities: Some("WiFi".to_string()),
        }],
        events: vec![
            HackathonEvent {
                event_id: 1,
                name: "Spring Hack".to_string(),
                start_date: date(2026, 10, 15),
                end_date: date(2026, 10, 18),
                event_type: Some("Hackathon".to_string()),
                max_participants: Some(100),
                venue_id: Some(1),
            },
            HackathonEvent {
                event_id: 2,
                name: "Past Hack".to_string(),
                start_date: date(2026, 1, 10),
                end_date: date(2026, 1, 12),
                event_type: Some("Hackathon".to_string()),
                max_participants: Some(50),
                venue_id: Some(1),
            },
        ],
        workshops: vec![workshop(1, 1, "Intro to Rust"), workshop(1, 2, "Async in Practice")],
        registrations: vec![registration(1, 1), registration(2, 1), registration(6, 2)],
        ..Default::default()
    }
}

// Relational store backed by a single dataset behind a mutex
pub struct InMemoryStore {
    pub data: Mutex<RelationalDataset>,
}

impl InMemoryStore {
    pub fn new(dataset: RelationalDataset) -> Self {
        Self {
            data: Mutex::new(dataset),
        }
    }

    pub fn snapshot(&self) -> RelationalDataset {
        self.data.lock().unwrap().clone()
    }
}

fn summary_of(data: &RelationalDataset, submission: &Submission) -> SubmissionSummary {
    let names: Vec<String> = data
        .creates
        .iter()
        .filter(|c| c.submission_id == submission.submission_id)
        .filter_map(|c| data.people.iter().find(|p| p.person_id == c.person_id))
        .map(|p| p.full_name())
        .collect();

    SubmissionSummary {
        submission_id: submission.submission_id,
        event_id: submission.event_id,
        project_name: submission.project_name.clone(),
        description: submission.description.clone(),
        submission_time: submission.submission_time,
        technology_stack: submission.technology_stack.clone(),
        repository_url: submission.repository_url.clone(),
        submission_type: submission.submission_type.clone(),
        event_name: data
            .events
            .iter()
            .find(|e| e.event_id == submission.event_id)
            .map(|e| e.name.clone()),
        team_members: (!names.is_empty()).then(|| names.join(", ")),
    }
}

fn details_of(data: &RelationalDataset, workshop: &Workshop) -> WorkshopDetails {
    let event = data.events.iter().find(|e| e.event_id == workshop.event_id);
    let venue = event
        .and_then(|e| e.venue_id)
        .and_then(|id| data.venues.iter().find(|v| v.venue_id == id));

    WorkshopDetails {
        workshop_number: workshop.workshop_number,
        event_id: workshop.event_id,
        title: workshop.title.clone(),
        description: workshop.description.clone(),
        duration: workshop.duration,
        skill_level: workshop.skill_level.clone(),
        max_attendees: workshop.max_attendees,
        event_name: event.map(|e| e.name.clone()),
        start_date: event.map(|e| e.start_date),
        end_date: event.map(|e| e.end_date),
        venue_name: venue.map(|v| v.name.clone()),
        venue_address: venue.map(|v| v.address.clone()),
    }
}

#[async_trait]
impl DatasetRepository for InMemoryStore {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn load_dataset(&self) -> Result<RelationalDataset, RepositoryError> {
        Ok(self.snapshot())
    }

    async fn replace_dataset(
        &self,
        dataset: &RelationalDataset,
    ) -> Result<TableCounts, RepositoryError> {
        *self.data.lock().unwrap() = dataset.clone();
        Ok(dataset.table_counts())
    }

    async fn table_counts(&self) -> Result<TableCounts, RepositoryError> {
        Ok(self.data.lock().unwrap().table_counts())
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryStore {
    async fn list_submissions(&self) -> Result<Vec<SubmissionSummary>, RepositoryError> {
        let data = self.data.lock().unwrap();
        let mut summaries: Vec<SubmissionSummary> =
            data.submissions.iter().map(|s| summary_of(&data, s)).collect();
        summaries.sort_by(|a, b| b.submission_time.cmp(&a.submission_time));
        Ok(summaries)
    }

    async fn get_submission(
        &self,
        submission_id: i32,
    ) -> Result<Option<SubmissionSummary>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .submissions
            .iter()
            .find(|s| s.submission_id == submission_id)
            .map(|s| summary_of(&data, s)))
    }

    async fn list_open_events(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<AvailableEvent>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .events
            .iter()
            .filter(|e| e.end_date >= today)
            .map(|e| AvailableEvent {
                event_id: e.event_id,
                name: e.name.clone(),
                start_date: e.start_date,
                end_date: e.end_date,
                event_type: e.event_type.clone(),
                max_participants: e.max_participants,
                venue_name: None,
                submission_count: data
                    .submissions
                    .iter()
                    .filter(|s| s.event_id == e.event_id)
                    .count() as i64,
                registration_count: data
                    .registrations
                    .iter()
                    .filter(|r| r.event_id == e.event_id)
                    .count() as i64,
            })
            .collect())
    }

    async fn find_event(&self, event_id: i32) -> Result<Option<HackathonEvent>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data.events.iter().find(|e| e.event_id == event_id).cloned())
    }

    async fn list_event_participants(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventParticipant>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .filter_map(|r| {
                let person = data.people.iter().find(|p| p.person_id == r.person_id)?;
                Some(EventParticipant {
                    person_id: person.person_id,
                    first_name: person.first_name.clone(),
                    last_name: person.last_name.clone(),
                    email: person.email.clone(),
                    registration_number: r.registration_number.clone(),
                    ticket_type: r.ticket_type.clone(),
                })
            })
            .collect())
    }

    async fn list_participants(&self) -> Result<Vec<ParticipantListing>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .participants
            .iter()
            .filter_map(|pa| {
                let person = data.people.iter().find(|p| p.person_id == pa.person_id)?;
                Some(ParticipantListing {
                    person_id: person.person_id,
                    first_name: person.first_name.clone(),
                    last_name: person.last_name.clone(),
                    email: person.email.clone(),
                    t_shirt_size: pa.t_shirt_size.clone(),
                })
            })
            .collect())
    }

    async fn registered_person_ids(
        &self,
        event_id: i32,
        person_ids: &[i32],
    ) -> Result<HashSet<i32>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id && person_ids.contains(&r.person_id))
            .map(|r| r.person_id)
            .collect())
    }

    async fn find_people(&self, person_ids: &[i32]) -> Result<Vec<Person>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .people
            .iter()
            .filter(|p| person_ids.contains(&p.person_id))
            .cloned()
            .collect())
    }

    async fn create_submission(&self, submission: &NewSubmission) -> Result<i32, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        if let Some(missing) = submission
            .team_member_ids
            .iter()
            .find(|id| !data.participants.iter().any(|p| p.person_id == **id))
        {
            return Err(RepositoryError::invalid_data(format!(
                "participant {} does not exist",
                missing
            )));
        }

        let submission_id = data
            .submissions
            .iter()
            .map(|s| s.submission_id)
            .max()
            .unwrap_or(0)
            + 1;
        data.submissions.push(Submission {
            submission_id,
            event_id: submission.event_id,
            project_name: submission.project_name.clone(),
            description: Some(submission.description.clone()),
            submission_time: submission.submission_time,
            technology_stack: Some(submission.technology_stack.clone()),
            repository_url: Some(submission.repository_url.clone()),
            submission_type: Some(submission.submission_type.to_string()),
        });
        for person_id in &submission.team_member_ids {
            data.creates.push(Creates {
                person_id: *person_id,
                submission_id,
            });
        }
        Ok(submission_id)
    }

    async fn delete_submission(&self, submission_id: i32) -> Result<bool, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        data.creates.retain(|c| c.submission_id != submission_id);
        data.evaluates.retain(|e| e.submission_id != submission_id);
        let before = data.submissions.len();
        data.submissions.retain(|s| s.submission_id != submission_id);
        Ok(data.submissions.len() < before)
    }
}

#[async_trait]
impl WorkshopRepository for InMemoryStore {
    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data.workshops.iter().map(|w| details_of(&data, w)).collect())
    }

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .events
            .iter()
            .map(|e| EventWorkshopCount {
                event_id: e.event_id,
                name: e.name.clone(),
                start_date: e.start_date,
                end_date: e.end_date,
                workshop_count: data
                    .workshops
                    .iter()
                    .filter(|w| w.event_id == e.event_id)
                    .count() as i64,
            })
            .collect())
    }

    async fn list_event_workshops(&self, event_id: i32) -> Result<Vec<Workshop>, RepositoryError> {
        let data = self.data.lock().unwrap();
        let mut workshops: Vec<Workshop> = data
            .workshops
            .iter()
            .filter(|w| w.event_id == event_id)
            .cloned()
            .collect();
        workshops.sort_by_key(|w| w.workshop_number);
        Ok(workshops)
    }

    async fn get_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<Option<WorkshopDetails>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .workshops
            .iter()
            .find(|w| w.event_id == event_id && w.workshop_number == workshop_number)
            .map(|w| details_of(&data, w)))
    }

    async fn event_exists(&self, event_id: i32) -> Result<bool, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data.events.iter().any(|e| e.event_id == event_id))
    }

    async fn create_workshop(&self, workshop: &NewWorkshop) -> Result<Workshop, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        let number = next_workshop_number(
            data.workshops
                .iter()
                .filter(|w| w.event_id == workshop.event_id)
                .map(|w| w.workshop_number),
        )
        .map_err(|e| RepositoryError::invalid_data(e.to_string()))?;
        let created = Workshop {
            workshop_number: number,
            event_id: workshop.event_id,
            title: workshop.title.clone(),
            description: Some(workshop.description.clone()),
            duration: Some(workshop.duration),
            skill_level: Some(workshop.skill_level.clone()),
            max_attendees: Some(workshop.max_attendees),
        };
        data.workshops.push(created.clone());
        Ok(created)
    }

    async fn update_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
        changes: &WorkshopChanges,
    ) -> Result<bool, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        let Some(workshop) = data
            .workshops
            .iter_mut()
            .find(|w| w.event_id == event_id && w.workshop_number == workshop_number)
        else {
            return Ok(false);
        };
        workshop.title = changes.title.clone();
        if changes.description.is_some() {
            workshop.description = changes.description.clone();
        }
        if changes.duration.is_some() {
            workshop.duration = changes.duration;
        }
        if changes.skill_level.is_some() {
            workshop.skill_level = changes.skill_level.clone();
        }
        if changes.max_attendees.is_some() {
            workshop.max_attendees = changes.max_attendees;
        }
        Ok(true)
    }

    async fn delete_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<bool, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        let before = data.workshops.len();
        data.workshops
            .retain(|w| !(w.event_id == event_id && w.workshop_number == workshop_number));
        Ok(data.workshops.len() < before)
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryStore {
    async fn submission_activity(
        &self,
        _start: NaiveDateTime,
        _end: NaiveDateTime,
        _today: NaiveDate,
    ) -> Result<Vec<SubmissionActivityRow>, RepositoryError> {
        Ok(vec![])
    }

    async fn registration_overview(
        &self,
        _event_type: &str,
    ) -> Result<Vec<RegistrationOverviewRow>, RepositoryError> {
        Ok(vec![])
    }

    async fn workshop_overview(
        &self,
        _skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, RepositoryError> {
        Ok(vec![])
    }

    async fn totals(&self) -> Result<SystemTotals, RepositoryError> {
        let counts = self.data.lock().unwrap().table_counts();
        Ok(SystemTotals {
            total_events: counts.hackathon_event,
            total_participants: counts.participant,
            total_submissions: counts.submission,
            total_registrations: counts.registration,
        })
    }

    async fn recent_submissions(
        &self,
        limit: i64,
    ) -> Result<Vec<SubmissionSummary>, RepositoryError> {
        let mut all = self.list_submissions().await?;
        all.truncate(limit as usize);
        Ok(all)
    }
}

// Document store keeping event documents in memory
pub struct InMemoryDocumentStore {
    pub events: Mutex<Vec<EventDocument>>,
    pub replaced: Mutex<Vec<DocumentSet>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(vec![]),
            replaced: Mutex::new(vec![]),
        }
    }

    pub fn with_events(events: Vec<EventDocument>) -> Self {
        Self {
            events: Mutex::new(events),
            replaced: Mutex::new(vec![]),
        }
    }

    pub fn event(&self, event_id: i32) -> Option<EventDocument> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
    }
}

pub fn event_document(event_id: i32, name: &str, workshop_numbers: &[i32]) -> EventDocument {
    EventDocument {
        id: event_id,
        name: name.to_string(),
        start_date: date(2026, 10, 15),
        end_date: date(2026, 10, 18),
        event_type: Some("Hackathon".to_string()),
        max_participants: Some(100),
        venue: None,
        workshops: workshop_numbers
            .iter()
            .map(|n| EmbeddedWorkshop {
                workshop_number: *n,
                title: format!("Workshop {}", n),
                description: None,
                duration: Some(60),
                skill_level: Some("Beginner".to_string()),
                max_attendees: Some(30),
            })
            .collect(),
        sponsors: vec![],
        registrations: vec![],
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    async fn replace_collections(&self, documents: &DocumentSet) -> Result<(), DocumentStoreError> {
        *self.events.lock().unwrap() = documents.events.clone();
        self.replaced.lock().unwrap().push(documents.clone());
        Ok(())
    }

    async fn stats(&self) -> Result<DocumentStoreStats, DocumentStoreError> {
        let events = self.events.lock().unwrap();
        Ok(DocumentStoreStats {
            participants: 0,
            events: events.len() as u64,
            submissions: 0,
            workshops: events.iter().map(|e| e.workshops.len() as u64).sum(),
        })
    }

    async fn find_event(&self, event_id: i32) -> Result<Option<EventDocument>, DocumentStoreError> {
        Ok(self.event(event_id))
    }

    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, DocumentStoreError> {
        Ok(vec![])
    }

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, DocumentStoreError> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .map(|e| EventWorkshopCount {
                event_id: e.id,
                name: e.name.clone(),
                start_date: e.start_date,
                end_date: e.end_date,
                workshop_count: e.workshops.len() as i64,
            })
            .collect())
    }

    async fn push_workshop(
        &self,
        event_id: i32,
        workshop: &EmbeddedWorkshop,
    ) -> Result<bool, DocumentStoreError> {
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.id == event_id) {
            Some(event) if event.workshop(workshop.workshop_number).is_none() => {
                event.workshops.push(workshop.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
        changes: &WorkshopChanges,
    ) -> Result<bool, DocumentStoreError> {
        let mut events = self.events.lock().unwrap();
        let workshop = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .and_then(|e| {
                e.workshops
                    .iter_mut()
                    .find(|w| w.workshop_number == workshop_number)
            });
        match workshop {
            Some(workshop) => {
                workshop.title = changes.title.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<WorkshopRemoval, DocumentStoreError> {
        let mut events = self.events.lock().unwrap();
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(WorkshopRemoval::EventNotFound);
        };
        let before = event.workshops.len();
        event
            .workshops
            .retain(|w| w.workshop_number != workshop_number);
        if event.workshops.len() < before {
            Ok(WorkshopRemoval::Removed)
        } else {
            Ok(WorkshopRemoval::WorkshopNotFound)
        }
    }

    async fn create_indexes(&self) -> Result<Vec<String>, DocumentStoreError> {
        Ok(vec![
            "idx_workshops_skill_level".to_string(),
            "idx_events_start_date".to_string(),
        ])
    }

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DocumentStoreError> {
        Ok(vec![])
    }

    async fn workshop_analytics(
        &self,
        _skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, DocumentStoreError> {
        Ok(vec![])
    }

    async fn explain_workshop_analytics(
        &self,
        _skill_level: Option<&str>,
    ) -> Result<serde_json::Value, DocumentStoreError> {
        Ok(serde_json::json!({ "executionStats": { "nReturned": 0 } }))
    }
}

/// Router state over `store`, with the schema marked ready when `ready` is set.
pub fn app_state(
    store: Arc<InMemoryStore>,
    documents: Option<Arc<InMemoryDocumentStore>>,
    ready: bool,
) -> AppState {
    let state = AppState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        documents.map(|d| d as Arc<dyn DocumentStore>),
    )
    .with_clock(fixed_clock);
    if ready {
        state.mark_schema_ready();
    }
    state
}
