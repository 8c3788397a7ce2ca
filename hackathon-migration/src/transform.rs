//! Builds the denormalized documents from an indexed relational dataset.
//!
//! A dangling reference never aborts the transform. When the referenced row
//! is missing, the relation is not embedded and the matching counter in
//! [`MigrationWarnings`] is incremented:
//!
//! * a missing snapshot target leaves the snapshot field empty,
//! * a missing child entity skips the child entry altogether.

use hackathon_shared::{
    DocumentSet, EmbeddedSponsor, EmbeddedWorkshop, EventDocument, EventRegistration,
    EventSnapshot, EventVenue, HackathonEvent, Participant, ParticipantDetails,
    ParticipantDocument, ParticipantRegistration, ParticipantSubmission, PersonSnapshot,
    RelationalDataset, Submission, SubmissionDocument, SubmissionEvaluation,
};
use serde::{Deserialize, Serialize};

use crate::index::LookupIndexes;

/// Referential anomalies found while building documents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationWarnings {
    pub registrations_missing_event: u64,
    pub registrations_missing_person: u64,
    pub creates_missing_submission: u64,
    pub creates_missing_person: u64,
    pub submissions_missing_event: u64,
    pub supports_missing_sponsor: u64,
    pub evaluates_missing_judge: u64,
}

impl MigrationWarnings {
    pub fn total(&self) -> u64 {
        self.registrations_missing_event
            + self.registrations_missing_person
            + self.creates_missing_submission
            + self.creates_missing_person
            + self.submissions_missing_event
            + self.supports_missing_sponsor
            + self.evaluates_missing_judge
    }
}

/// Documents ready for insertion plus the anomalies found building them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationOutput {
    pub documents: DocumentSet,
    pub warnings: MigrationWarnings,
}

/// Build participant, event and submission documents.
///
/// Documents follow the order of their root table in `dataset`; embedded
/// arrays follow the order of the association rows.
pub fn transform(dataset: &RelationalDataset, indexes: &LookupIndexes<'_>) -> MigrationOutput {
    let mut warnings = MigrationWarnings::default();

    let participants = dataset
        .participants
        .iter()
        .map(|participant| participant_document(participant, indexes, &mut warnings))
        .collect();
    let events = dataset
        .events
        .iter()
        .map(|event| event_document(event, indexes, &mut warnings))
        .collect();
    let submissions = dataset
        .submissions
        .iter()
        .map(|submission| submission_document(submission, indexes, &mut warnings))
        .collect();

    MigrationOutput {
        documents: DocumentSet {
            participants,
            events,
            submissions,
        },
        warnings,
    }
}

fn event_snapshot(indexes: &LookupIndexes<'_>, event: Option<&HackathonEvent>) -> Option<EventSnapshot> {
    event.map(|event| EventSnapshot::new(event, indexes.venue_of(event)))
}

fn participant_document(
    participant: &Participant,
    indexes: &LookupIndexes<'_>,
    warnings: &mut MigrationWarnings,
) -> ParticipantDocument {
    let person_id = participant.person_id;

    let registrations = indexes
        .registrations_of_person(person_id)
        .iter()
        .map(|registration| {
            let event = indexes.event(registration.event_id);
            if event.is_none() {
                warnings.registrations_missing_event += 1;
            }
            if indexes.person(registration.person_id).is_none() {
                warnings.registrations_missing_person += 1;
            }
            ParticipantRegistration {
                event_id: registration.event_id,
                registration_number: registration.registration_number.clone(),
                registration_timestamp: registration.registration_timestamp,
                payment_status: registration.payment_status.clone(),
                ticket_type: registration.ticket_type.clone(),
                event_snapshot: event_snapshot(indexes, event),
            }
        })
        .collect();

    let submissions = indexes
        .creates_of_person(person_id)
        .iter()
        .filter_map(|creates| {
            let Some(submission) = indexes.submission(creates.submission_id) else {
                warnings.creates_missing_submission += 1;
                return None;
            };
            Some(ParticipantSubmission {
                submission_id: submission.submission_id,
                project_name: submission.project_name.clone(),
                submission_time: submission.submission_time,
                repository_url: submission.repository_url.clone(),
                event_snapshot: event_snapshot(indexes, indexes.event(submission.event_id)),
            })
        })
        .collect();

    ParticipantDocument {
        id: person_id,
        person: indexes.person(person_id).map(PersonSnapshot::from),
        participant: ParticipantDetails {
            registration_date: participant.registration_date,
            t_shirt_size: participant.t_shirt_size.clone(),
            dietary_restrictions: participant.dietary_restrictions.clone(),
            manager_id: participant.manager_id,
        },
        registrations,
        submissions,
    }
}

fn event_document(
    event: &HackathonEvent,
    indexes: &LookupIndexes<'_>,
    warnings: &mut MigrationWarnings,
) -> EventDocument {
    let workshops = indexes
        .workshops_of_event(event.event_id)
        .iter()
        .map(|workshop| EmbeddedWorkshop::from(*workshop))
        .collect();

    let sponsors = indexes
        .supports_of_event(event.event_id)
        .iter()
        .filter_map(|supports| {
            let Some(sponsor) = indexes.sponsor(supports.sponsor_id) else {
                warnings.supports_missing_sponsor += 1;
                return None;
            };
            Some(EmbeddedSponsor {
                sponsor_id: sponsor.sponsor_id,
                company_name: sponsor.company_name.clone(),
                industry: sponsor.industry.clone(),
                website: sponsor.website.clone(),
                contribution_amount: sponsor.contribution_amount,
            })
        })
        .collect();

    let registrations = indexes
        .registrations_of_event(event.event_id)
        .iter()
        .filter_map(|registration| {
            let Some(person) = indexes.person(registration.person_id) else {
                warnings.registrations_missing_person += 1;
                return None;
            };
            Some(EventRegistration {
                person_id: registration.person_id,
                registration_number: registration.registration_number.clone(),
                registration_timestamp: registration.registration_timestamp,
                payment_status: registration.payment_status.clone(),
                ticket_type: registration.ticket_type.clone(),
                participant: PersonSnapshot::from(person),
            })
        })
        .collect();

    EventDocument {
        id: event.event_id,
        name: event.name.clone(),
        start_date: event.start_date,
        end_date: event.end_date,
        event_type: event.event_type.clone(),
        max_participants: event.max_participants,
        venue: indexes.venue_of(event).map(EventVenue::from),
        workshops,
        sponsors,
        registrations,
    }
}

fn submission_document(
    submission: &Submission,
    indexes: &LookupIndexes<'_>,
    warnings: &mut MigrationWarnings,
) -> SubmissionDocument {
    let team = indexes
        .creates_of_submission(submission.submission_id)
        .iter()
        .filter_map(|creates| {
            let person = indexes.person(creates.person_id);
            if person.is_none() {
                warnings.creates_missing_person += 1;
            }
            person.map(PersonSnapshot::from)
        })
        .collect();

    let evaluations = indexes
        .evaluates_of_submission(submission.submission_id)
        .iter()
        .map(|evaluates| {
            let judge = indexes.person(evaluates.person_id);
            if judge.is_none() {
                warnings.evaluates_missing_judge += 1;
            }
            SubmissionEvaluation {
                judge_id: evaluates.person_id,
                score: evaluates.score,
                feedback: evaluates.feedback.clone(),
                judge: judge.map(PersonSnapshot::from),
            }
        })
        .collect();

    let event = indexes.event(submission.event_id);
    if event.is_none() {
        warnings.submissions_missing_event += 1;
    }

    SubmissionDocument {
        id: submission.submission_id,
        event_id: submission.event_id,
        project_name: submission.project_name.clone(),
        description: submission.description.clone(),
        submission_time: submission.submission_time,
        technology_stack: submission.technology_stack.clone(),
        repository_url: submission.repository_url.clone(),
        submission_type: submission.submission_type.clone(),
        event_snapshot: event_snapshot(indexes, event),
        team,
        evaluations,
    }
}
