//! Workshop management over the relational store and the document replica.
//!
//! Both variants share the request validation and the per-event numbering
//! rule; they differ only in where the workshop lives.

use std::sync::Arc;

use hackathon_repository::{
    DocumentStore, DocumentStoreError, RepositoryError, WorkshopRemoval, WorkshopRepository,
};
use hackathon_shared::workshop::{
    DEFAULT_MAX_ATTENDEES, DEFAULT_SKILL_LEVEL, DEFAULT_WORKSHOP_DURATION,
};
use hackathon_shared::{
    next_workshop_number, CreateWorkshopRequest, EmbeddedWorkshop, EventDocument,
    EventWorkshopCount, NewWorkshop, UpdateWorkshopRequest, Workshop, WorkshopChanges,
    WorkshopDetails, WorkshopNumberExhausted,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WorkshopError {
    #[error("Event and workshop title are required")]
    MissingRequiredFields,

    #[error("Workshop title is required")]
    MissingTitle,

    #[error("Event not found")]
    EventNotFound,

    #[error("Workshop not found")]
    WorkshopNotFound,

    #[error("Workshop number {0} was taken concurrently, retry the request")]
    NumberTaken(i32),

    #[error(transparent)]
    NumberExhausted(#[from] WorkshopNumberExhausted),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    DocumentStore(#[from] DocumentStoreError),
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn positive(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v > 0)
}

/// Validate a create request and apply the defaults.
pub fn validate_new_workshop(request: &CreateWorkshopRequest) -> Result<NewWorkshop, WorkshopError> {
    let event_id = request.event_id.filter(|id| *id > 0);
    let title = non_blank(request.title.as_deref());
    let (Some(event_id), Some(title)) = (event_id, title) else {
        return Err(WorkshopError::MissingRequiredFields);
    };

    Ok(NewWorkshop {
        event_id,
        title,
        description: request.description.clone().unwrap_or_default(),
        duration: positive(request.duration).unwrap_or(DEFAULT_WORKSHOP_DURATION),
        skill_level: non_blank(request.skill_level.as_deref())
            .unwrap_or_else(|| DEFAULT_SKILL_LEVEL.to_string()),
        max_attendees: positive(request.max_attendees).unwrap_or(DEFAULT_MAX_ATTENDEES),
    })
}

/// Validate an update request. Absent fields keep their stored value.
pub fn validate_changes(request: &UpdateWorkshopRequest) -> Result<WorkshopChanges, WorkshopError> {
    let title = non_blank(request.title.as_deref()).ok_or(WorkshopError::MissingTitle)?;
    Ok(WorkshopChanges {
        title,
        description: request.description.clone(),
        duration: positive(request.duration),
        skill_level: non_blank(request.skill_level.as_deref()),
        max_attendees: positive(request.max_attendees),
    })
}

/// Relational workshop management.
pub struct WorkshopService {
    repository: Arc<dyn WorkshopRepository>,
}

impl WorkshopService {
    pub fn new(repository: Arc<dyn WorkshopRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<WorkshopDetails>, WorkshopError> {
        Ok(self.repository.list_workshops().await?)
    }

    pub async fn events(&self) -> Result<Vec<EventWorkshopCount>, WorkshopError> {
        Ok(self.repository.list_events_with_workshop_counts().await?)
    }

    pub async fn by_event(&self, event_id: i32) -> Result<Vec<Workshop>, WorkshopError> {
        Ok(self.repository.list_event_workshops(event_id).await?)
    }

    pub async fn get(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<WorkshopDetails, WorkshopError> {
        self.repository
            .get_workshop(event_id, workshop_number)
            .await?
            .ok_or(WorkshopError::WorkshopNotFound)
    }

    /// Create a workshop under the next free number of its event.
    pub async fn create(&self, request: &CreateWorkshopRequest) -> Result<WorkshopDetails, WorkshopError> {
        let workshop = validate_new_workshop(request)?;
        if !self.repository.event_exists(workshop.event_id).await? {
            return Err(WorkshopError::EventNotFound);
        }

        let created = self.repository.create_workshop(&workshop).await?;
        info!(
            event_id = created.event_id,
            workshop_number = created.workshop_number,
            "Created workshop"
        );
        self.get(created.event_id, created.workshop_number).await
    }

    pub async fn update(
        &self,
        event_id: i32,
        workshop_number: i32,
        request: &UpdateWorkshopRequest,
    ) -> Result<(), WorkshopError> {
        let changes = validate_changes(request)?;
        if self
            .repository
            .update_workshop(event_id, workshop_number, &changes)
            .await?
        {
            Ok(())
        } else {
            Err(WorkshopError::WorkshopNotFound)
        }
    }

    pub async fn delete(&self, event_id: i32, workshop_number: i32) -> Result<(), WorkshopError> {
        if self.repository.delete_workshop(event_id, workshop_number).await? {
            Ok(())
        } else {
            Err(WorkshopError::WorkshopNotFound)
        }
    }
}

/// Flatten an embedded workshop with its parent event.
pub fn embedded_details(event: &EventDocument, workshop: &EmbeddedWorkshop) -> WorkshopDetails {
    WorkshopDetails {
        workshop_number: workshop.workshop_number,
        event_id: event.id,
        title: workshop.title.clone(),
        description: workshop.description.clone(),
        duration: workshop.duration,
        skill_level: workshop.skill_level.clone(),
        max_attendees: workshop.max_attendees,
        event_name: Some(event.name.clone()),
        start_date: Some(event.start_date),
        end_date: Some(event.end_date),
        venue_name: event.venue.as_ref().map(|v| v.name.clone()),
        venue_address: event.venue.as_ref().map(|v| v.address.clone()),
    }
}

/// Workshop management on the workshops embedded in event documents.
pub struct DocumentWorkshopService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentWorkshopService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<WorkshopDetails>, WorkshopError> {
        Ok(self.store.list_workshops().await?)
    }

    pub async fn events(&self) -> Result<Vec<EventWorkshopCount>, WorkshopError> {
        Ok(self.store.list_events_with_workshop_counts().await?)
    }

    pub async fn get(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<WorkshopDetails, WorkshopError> {
        let event = self
            .store
            .find_event(event_id)
            .await?
            .ok_or(WorkshopError::WorkshopNotFound)?;
        event
            .workshop(workshop_number)
            .map(|workshop| embedded_details(&event, workshop))
            .ok_or(WorkshopError::WorkshopNotFound)
    }

    /// Append a workshop to its event document under the next free number.
    ///
    /// The push only applies while the number is still free; otherwise
    /// [`WorkshopError::NumberTaken`].
    pub async fn create(&self, request: &CreateWorkshopRequest) -> Result<WorkshopDetails, WorkshopError> {
        let workshop = validate_new_workshop(request)?;
        let event = self
            .store
            .find_event(workshop.event_id)
            .await?
            .ok_or(WorkshopError::EventNotFound)?;

        let number = next_workshop_number(event.workshops.iter().map(|w| w.workshop_number))?;
        let embedded = EmbeddedWorkshop {
            workshop_number: number,
            title: workshop.title,
            description: Some(workshop.description),
            duration: Some(workshop.duration),
            skill_level: Some(workshop.skill_level),
            max_attendees: Some(workshop.max_attendees),
        };

        if !self.store.push_workshop(event.id, &embedded).await? {
            return Err(WorkshopError::NumberTaken(number));
        }
        info!(event_id = event.id, workshop_number = number, "Created embedded workshop");

        Ok(embedded_details(&event, &embedded))
    }

    pub async fn update(
        &self,
        event_id: i32,
        workshop_number: i32,
        request: &UpdateWorkshopRequest,
    ) -> Result<(), WorkshopError> {
        let changes = validate_changes(request)?;
        if self
            .store
            .update_workshop(event_id, workshop_number, &changes)
            .await?
        {
            Ok(())
        } else {
            Err(WorkshopError::WorkshopNotFound)
        }
    }

    pub async fn delete(&self, event_id: i32, workshop_number: i32) -> Result<(), WorkshopError> {
        match self.store.pull_workshop(event_id, workshop_number).await? {
            WorkshopRemoval::Removed => Ok(()),
            WorkshopRemoval::EventNotFound => Err(WorkshopError::EventNotFound),
            WorkshopRemoval::WorkshopNotFound => Err(WorkshopError::WorkshopNotFound),
        }
    }
}
