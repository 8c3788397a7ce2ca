//! Submission workflow: ordered validation followed by a transactional insert.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use hackathon_repository::{RepositoryError, SubmissionRepository};
use hackathon_shared::submission::ParseSubmissionTypeError;
use hackathon_shared::{
    AvailableEvent, CreateSubmissionRequest, EventParticipant, HackathonEvent, NewSubmission,
    ParticipantListing, SubmissionSummary, SubmissionType,
};
use thiserror::Error;
use tracing::info;

/// Business rule violations and storage failures of the submission workflow.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Project name and at least one team member are required")]
    MissingRequiredFields,

    #[error("Event selection is required")]
    MissingEvent,

    #[error("Selected event does not exist")]
    SelectedEventNotFound,

    #[error("Submission period for \"{0}\" has closed")]
    SubmissionClosed(String),

    #[error(
        "All team members must be registered for the selected event. Not registered: {}",
        .0.join(", ")
    )]
    MembersNotRegistered(Vec<String>),

    #[error("Individual submissions cannot have multiple team members")]
    IndividualWithMultipleMembers,

    #[error(transparent)]
    InvalidSubmissionType(#[from] ParseSubmissionTypeError),

    #[error("Event not found")]
    EventNotFound,

    #[error("Submission not found")]
    SubmissionNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A stored submission together with the name of its event.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedSubmission {
    pub event_name: String,
    pub submission: SubmissionSummary,
}

/// Drop repeated ids, keeping the first occurrence.
fn unique_in_order(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct SubmissionService {
    repository: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(repository: Arc<dyn SubmissionRepository>) -> Self {
        Self { repository }
    }

    /// Run every validation step against `request`.
    ///
    /// Steps run in a fixed order and the first failing step decides the
    /// error:
    ///
    /// 1. project name and at least one team member
    /// 2. event id present
    /// 3. event exists
    /// 4. `now` is on or before the event's last day
    /// 5. every member is registered for the event
    /// 6. declared type matches the team size
    ///
    /// # Returns
    ///
    /// * `Ok((NewSubmission, HackathonEvent))` - The submission to insert and its event
    /// * `Err(SubmissionError)` - The first rule that failed
    pub async fn validate(
        &self,
        request: &CreateSubmissionRequest,
        now: NaiveDateTime,
    ) -> Result<(NewSubmission, HackathonEvent), SubmissionError> {
        let project_name = non_blank(request.project_name.as_deref())
            .ok_or(SubmissionError::MissingRequiredFields)?;
        if request.team_member_ids.is_empty() {
            return Err(SubmissionError::MissingRequiredFields);
        }

        let event_id = request
            .event_id
            .filter(|id| *id > 0)
            .ok_or(SubmissionError::MissingEvent)?;

        let event = self
            .repository
            .find_event(event_id)
            .await?
            .ok_or(SubmissionError::SelectedEventNotFound)?;

        if !event.accepts_submissions_on(now.date()) {
            return Err(SubmissionError::SubmissionClosed(event.name));
        }

        let members = unique_in_order(&request.team_member_ids);
        let registered = self
            .repository
            .registered_person_ids(event_id, &members)
            .await?;
        let unregistered: Vec<i32> = members
            .iter()
            .copied()
            .filter(|id| !registered.contains(id))
            .collect();
        if !unregistered.is_empty() {
            let names = self.member_names(&unregistered).await?;
            return Err(SubmissionError::MembersNotRegistered(names));
        }

        // Team size is the request's list as given; repeated ids still count.
        let team_size = request.team_member_ids.len();
        let submission_type = match non_blank(request.submission_type.as_deref()) {
            Some(declared) => declared.parse::<SubmissionType>()?,
            None => SubmissionType::default_for_team_size(team_size),
        };
        if submission_type == SubmissionType::Individual && team_size != 1 {
            return Err(SubmissionError::IndividualWithMultipleMembers);
        }

        let submission = NewSubmission {
            event_id,
            project_name: project_name.to_string(),
            description: request.description.clone().unwrap_or_default(),
            submission_time: now.with_nanosecond(0).unwrap_or(now),
            technology_stack: request.technology_stack.clone().unwrap_or_default(),
            repository_url: request.repository_url.clone().unwrap_or_default(),
            submission_type,
            team_member_ids: members,
        };
        Ok((submission, event))
    }

    /// Display names for `person_ids`, in the given order.
    async fn member_names(&self, person_ids: &[i32]) -> Result<Vec<String>, SubmissionError> {
        let people = self.repository.find_people(person_ids).await?;
        Ok(person_ids
            .iter()
            .map(|id| {
                people
                    .iter()
                    .find(|p| p.person_id == *id)
                    .map(|p| p.full_name())
                    .unwrap_or_else(|| format!("person {}", id))
            })
            .collect())
    }

    /// Validate and store a submission with its team.
    pub async fn create(
        &self,
        request: &CreateSubmissionRequest,
        now: NaiveDateTime,
    ) -> Result<CreatedSubmission, SubmissionError> {
        let (submission, event) = self.validate(request, now).await?;

        let submission_id = self.repository.create_submission(&submission).await?;
        info!(
            submission_id,
            event_id = event.event_id,
            team_size = submission.team_member_ids.len(),
            "Created submission"
        );

        let stored = self
            .repository
            .get_submission(submission_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::invalid_data(format!(
                    "submission {} was not found after insert",
                    submission_id
                ))
            })?;

        Ok(CreatedSubmission {
            event_name: event.name,
            submission: stored,
        })
    }

    pub async fn list(&self) -> Result<Vec<SubmissionSummary>, SubmissionError> {
        Ok(self.repository.list_submissions().await?)
    }

    pub async fn get(&self, submission_id: i32) -> Result<SubmissionSummary, SubmissionError> {
        self.repository
            .get_submission(submission_id)
            .await?
            .ok_or(SubmissionError::SubmissionNotFound)
    }

    pub async fn delete(&self, submission_id: i32) -> Result<(), SubmissionError> {
        if self.repository.delete_submission(submission_id).await? {
            info!(submission_id, "Deleted submission");
            Ok(())
        } else {
            Err(SubmissionError::SubmissionNotFound)
        }
    }

    pub async fn open_events(&self, today: NaiveDate) -> Result<Vec<AvailableEvent>, SubmissionError> {
        Ok(self.repository.list_open_events(today).await?)
    }

    pub async fn event_participants(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventParticipant>, SubmissionError> {
        if self.repository.find_event(event_id).await?.is_none() {
            return Err(SubmissionError::EventNotFound);
        }
        Ok(self.repository.list_event_participants(event_id).await?)
    }

    pub async fn participants(&self) -> Result<Vec<ParticipantListing>, SubmissionError> {
        Ok(self.repository.list_participants().await?)
    }
}
