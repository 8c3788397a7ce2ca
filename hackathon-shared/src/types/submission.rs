//! Submission request and read-model types.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of submission, consistent with the size of its team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Individual,
    Team,
}

impl SubmissionType {
    /// Type assumed when the request does not declare one.
    pub fn default_for_team_size(members: usize) -> Self {
        if members == 1 {
            Self::Individual
        } else {
            Self::Team
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown submission type: {0}")]
pub struct ParseSubmissionTypeError(pub String);

impl FromStr for SubmissionType {
    type Err = ParseSubmissionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "team" => Ok(Self::Team),
            other => Err(ParseSubmissionTypeError(other.to_string())),
        }
    }
}

/// Body of `POST /api/submissions`.
///
/// Every field is optional at the wire level so that missing values surface
/// as validation errors with a stable message rather than as parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSubmissionRequest {
    pub project_name: Option<String>,
    pub event_id: Option<i32>,
    pub description: Option<String>,
    pub technology_stack: Option<String>,
    pub repository_url: Option<String>,
    pub submission_type: Option<String>,
    #[serde(default)]
    pub team_member_ids: Vec<i32>,
}

/// A validated submission ready to be persisted with its team.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub event_id: i32,
    pub project_name: String,
    pub description: String,
    pub submission_time: NaiveDateTime,
    pub technology_stack: String,
    pub repository_url: String,
    pub submission_type: SubmissionType,
    pub team_member_ids: Vec<i32>,
}

/// Submission joined with its event name and team member names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionSummary {
    pub submission_id: i32,
    pub event_id: i32,
    pub project_name: String,
    pub description: Option<String>,
    pub submission_time: NaiveDateTime,
    pub technology_stack: Option<String>,
    pub repository_url: Option<String>,
    pub submission_type: Option<String>,
    pub event_name: Option<String>,
    /// Team member names joined with `", "`.
    pub team_members: Option<String>,
}

/// Event still open for submissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailableEvent {
    pub event_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_type: Option<String>,
    pub max_participants: Option<i32>,
    pub venue_name: Option<String>,
    pub submission_count: i64,
    pub registration_count: i64,
}

/// Participant registered for a given event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventParticipant {
    pub person_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registration_number: String,
    pub ticket_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantListing {
    pub person_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub t_shirt_size: Option<String>,
}
