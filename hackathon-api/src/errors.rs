//! Error types for the HTTP layer.
//!
//! Every failure a handler can produce is converted into [`ApiError`], which
//! renders as `{ "success": false, "error": "<message>" }` with the matching
//! status code.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hackathon_migration::MigrationError;
use hackathon_repository::{DocumentStoreError, RepositoryError};
use hackathon_shared::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::services::{AnalyticsError, SubmissionError, WorkshopError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or inconsistent input.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A backing store is not initialized or unreachable.
    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        if err.is_connectivity() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<DocumentStoreError> for ApiError {
    fn from(err: DocumentStoreError) -> Self {
        if err.is_connectivity() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<MigrationError> for ApiError {
    fn from(err: MigrationError) -> Self {
        match err {
            MigrationError::Repository(e) => e.into(),
            MigrationError::DocumentStore(e) => e.into(),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::SelectedEventNotFound
            | SubmissionError::EventNotFound
            | SubmissionError::SubmissionNotFound => Self::NotFound(err.to_string()),
            SubmissionError::Repository(e) => e.into(),
            SubmissionError::MissingRequiredFields
            | SubmissionError::MissingEvent
            | SubmissionError::SubmissionClosed(_)
            | SubmissionError::MembersNotRegistered(_)
            | SubmissionError::IndividualWithMultipleMembers
            | SubmissionError::InvalidSubmissionType(_) => Self::Validation(err.to_string()),
        }
    }
}

impl From<WorkshopError> for ApiError {
    fn from(err: WorkshopError) -> Self {
        match err {
            WorkshopError::MissingRequiredFields | WorkshopError::MissingTitle => {
                Self::Validation(err.to_string())
            }
            WorkshopError::EventNotFound | WorkshopError::WorkshopNotFound => {
                Self::NotFound(err.to_string())
            }
            WorkshopError::NumberTaken(_) | WorkshopError::NumberExhausted(_) => {
                Self::Internal(err.to_string())
            }
            WorkshopError::Repository(e) => e.into(),
            WorkshopError::DocumentStore(e) => e.into(),
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::InvalidDate(_) => Self::Validation(err.to_string()),
            AnalyticsError::Repository(e) => e.into(),
            AnalyticsError::DocumentStore(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
